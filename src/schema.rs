//! Static per-vendor column catalogs.
//!
//! Each vendor has an ordered list of recognized column names with the type
//! their fields parse into, plus a small required subset used to reject files
//! whose first line matched a signature but which are not actually that
//! vendor's format. Real files may carry extra telemetry columns not listed
//! here; those are bound as plain text passthrough columns.

use crate::types::{ColumnDef, ColumnType};

use ColumnType::{Integer, Real, Text};

/// Recognized columns in Avidyne engine logs.
///
/// Files may have fewer columns than this and in a different order. A
/// four-cylinder engine, for example, logs no E5, E6, C5, or C6.
pub const AVIDYNE_COLUMNS: &[(&str, ColumnType)] = &[
    ("TIME", Text),
    ("LAT", Real),
    ("LON", Real),
    ("PALT", Integer), // pressure altitude (only on turbo)
    ("DALT", Integer), // density altitude (only on turbo)
    ("E1", Integer),   // exhaust gas temps
    ("E2", Integer),
    ("E3", Integer),
    ("E4", Integer),
    ("E5", Integer),
    ("E6", Integer),
    ("C1", Integer), // cylinder head temps
    ("C2", Integer),
    ("C3", Integer),
    ("C4", Integer),
    ("C5", Integer),
    ("C6", Integer),
    ("OILT", Integer),
    ("OILP", Integer),
    ("RPM", Integer),
    ("OAT", Integer),  // outside air temp (degrees C)
    ("MAP", Real),     // manifold pressure (inches Hg)
    ("FF", Real),      // fuel flow (gph)
    ("USED", Real),    // cumulative gallons fuel used
    ("AMP1", Integer),
    ("AMP2", Integer),
    ("AMPB", Integer),
    ("MBUS", Real),
    ("EBUS", Real),
    ("TIT", Integer), // turbine inlet temperature (only on turbo)
];

/// Quick sanity subset; files missing any of these are rejected.
pub const AVIDYNE_REQUIRED_COLUMNS: &[&str] = &["TIME", "LAT", "E1", "MAP", "FF"];

/// Recognized columns in Garmin logs.
///
/// See "FLIGHT DATA LOGGING" in the Garmin manual:
/// <https://static.garmin.com/pumac/190-00820-12_B.pdf>
///
/// This is a subset of the columns in the data files; a few others are either
/// opaque or not useful.
pub const GARMIN_COLUMNS: &[(&str, ColumnType)] = &[
    ("Lcl Date", Text), // format YYYY-MM-DD
    ("Lcl Time", Text), // format HH:MM:SS
    ("UTCOfst", Text),  // format [+-]hh:mm
    ("AtvWpt", Text),   // active waypoint
    ("Latitude", Real), // North is positive
    ("Longitude", Real), // East is positive
    ("AltB", Real),     // baro-corrected altitude (feet)
    ("BaroA", Real),    // altimeter setting (inches Hg)
    ("AltMSL", Text),   // GPS-derived altitude (feet)
    ("OAT", Real),      // outside air temperature (degrees C)
    ("IAS", Real),      // indicated airspeed (knots)
    ("GndSpd", Real),   // ground speed (knots)
    ("VSpd", Real),     // vertical speed (feet / minute)
    ("Pitch", Real),    // pitch (degrees)
    ("Roll", Real),     // roll (degrees)
    ("LatAc", Real),    // lateral acceleration / G force
    ("NormAc", Real),   // vertical acceleration / G force
    ("HDG", Real),      // heading (degrees magnetic)
    ("TRK", Real),      // track (degrees magnetic)
    ("volt1", Real),    // bus 1 voltage
    ("volt2", Real),    // bus 2 voltage
    ("amp1", Real),     // alternator 1 amperage
    ("FQtyL", Real),    // left tank fuel (gallons)
    ("FQtyR", Real),    // right tank fuel (gallons)
    ("E1 FFlow", Real), // fuel flow (gallons / hour)
    ("E1 OilT", Real),  // oil temp (degrees F)
    ("E1 OilP", Real),  // oil pressure (psi)
    ("E1 MAP", Real),   // manifold pressure (inches Hg)
    ("E1 RPM", Real),   // engine speed (rpm)
    ("E1 %Pwr", Real),  // percent power, where 1 = 100%
    ("E1 CHT1", Real),  // cylinder head temps (degrees F)
    ("E1 CHT2", Real),
    ("E1 CHT3", Real),
    ("E1 CHT4", Real),
    ("E1 CHT5", Real),
    ("E1 CHT6", Real),
    ("E1 EGT1", Real), // exhaust gas temps (degrees F)
    ("E1 EGT2", Real),
    ("E1 EGT3", Real),
    ("E1 EGT4", Real),
    ("E1 EGT5", Real),
    ("E1 EGT6", Real),
    ("E1 TIT1", Real), // turbo 1 inlet temp (degrees F)
    ("E1 TIT2", Real), // turbo 2 inlet temp (degrees F)
    ("AltGPS", Real),  // GPS-derived altitude, WGS84 datum
    ("TAS", Integer),  // true airspeed (knots)
    ("HSIS", Text),    // navigation source (GPS, NAV1, NAV2)
    ("CRS", Real),     // navigation course (degrees magnetic)
    ("NAV1", Real),    // NAV1 frequency (MHz)
    ("NAV2", Real),    // NAV2 frequency (MHz)
    ("COM1", Real),    // COM1 frequency (MHz)
    ("COM2", Real),    // COM2 frequency (MHz)
    ("HCDI", Real),    // horizontal course deviation deflection
    ("VCDI", Text),    // vertical (glideslope) deflection
    ("WndSpd", Real),  // wind aloft speed (knots)
    ("WndDr", Real),   // wind aloft direction (degrees, can be negative)
    ("WptDst", Real),  // distance to next waypoint
    ("WptBrg", Real),  // bearing to next waypoint
    ("MagVar", Real),  // magnetic variation
    ("AfcsOn", Integer), // 1=autopilot on, 0=off
    ("RollM", Text),   // flight director roll mode: HDG, GPS, ...
    ("PitchM", Text),  // flight director pitch mode: PIT, ALT, ALTS, ...
    ("RollC", Real),   // flight director roll commanded
    ("PichC", Real),   // flight director pitch commanded
    ("VSpdG", Real),   // GPS-derived vertical speed
    ("GPSfix", Real),  // quality of GPS fix, usually "3D"
    // columns added with an SF50 and a Garmin G3000
    ("AltInd", Real), // indicated altitude, replaces AltB
    ("amp2", Real),
    ("E1 Torq", Real), // turboprop only
    ("E1 NG", Real),   // turboprop only
    ("E1 ITT", Real),  // interstage turbine temp, degrees C
    ("E1 N1", Real),   // N1 speed, where 1.0 == 100%
    ("E1 N2", Real),   // N2 speed, where 1.0 == 100%
];

/// Quick sanity subset; files missing any of these are rejected.
pub const GARMIN_REQUIRED_COLUMNS: &[&str] = &["Lcl Date", "Latitude", "E1 FFlow", "AfcsOn"];

/// Look up a header name in a vendor catalog.
///
/// Returns `None` for names outside the curated list so the binder can fall
/// back to a text passthrough definition.
pub fn lookup(catalog: &[(&str, ColumnType)], name: &str) -> Option<ColumnDef> {
    catalog
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(known, column_type)| ColumnDef::new(*known, *column_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_column() {
        let def = lookup(AVIDYNE_COLUMNS, "MAP").unwrap();
        assert_eq!(def.name, "MAP");
        assert_eq!(def.column_type, ColumnType::Real);

        let def = lookup(GARMIN_COLUMNS, "AfcsOn").unwrap();
        assert_eq!(def.column_type, ColumnType::Integer);
    }

    #[test]
    fn test_lookup_unknown_column() {
        assert!(lookup(AVIDYNE_COLUMNS, "Latitude").is_none());
        assert!(lookup(GARMIN_COLUMNS, "LAT").is_none());
        assert!(lookup(GARMIN_COLUMNS, "").is_none());
    }

    #[test]
    fn test_required_columns_are_in_catalogs() {
        for name in AVIDYNE_REQUIRED_COLUMNS {
            assert!(lookup(AVIDYNE_COLUMNS, name).is_some(), "{name}");
        }
        for name in GARMIN_REQUIRED_COLUMNS {
            assert!(lookup(GARMIN_COLUMNS, name).is_some(), "{name}");
        }
    }
}

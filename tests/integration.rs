use approx::assert_abs_diff_eq;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use heliotime::julian::day_of_year;
use heliotime::{
    compute_day_events, compute_solar_position, hour_angle_crossing, round_to_minute,
    twilight_safeguard, Coordinates, HighLatitudeRule, Horizon, JulianDate, SolarError, Twilight,
};
use qtty::{Degrees, Hours};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap().and_utc()
}

fn raleigh() -> Coordinates {
    Coordinates::new(35.0 + 47.0 / 60.0, -(78.0 + 39.0 / 60.0)).unwrap()
}

#[test]
fn civil_date_roundtrip_around_j2000() {
    let jd = JulianDate::from_date(date(2000, 1, 1));
    assert_abs_diff_eq!((JulianDate::J2000 - jd).value(), 0.5, epsilon = 1e-12);
    assert_eq!(JulianDate::J2000.to_date(), Some(date(2000, 1, 1)));
    assert_eq!(jd.to_date(), Some(date(2000, 1, 1)));
}

#[test]
fn raleigh_timetable_rounds_to_published_minutes() {
    let day = compute_day_events(date(2015, 7, 12), &raleigh()).unwrap();
    let minute = |hours: Hours| round_to_minute(day.to_utc(hours).unwrap()).unwrap();

    let dawn = day.hour_angle_crossing(Degrees::new(-15.0), false).unwrap();
    let dusk = day.hour_angle_crossing(Degrees::new(-15.0), true).unwrap();

    assert_eq!(minute(dawn), utc(2015, 7, 12, 8, 42));
    assert_eq!(minute(day.sunrise().unwrap()), utc(2015, 7, 12, 10, 8));
    assert_eq!(minute(day.transit()), utc(2015, 7, 12, 17, 20));
    assert_eq!(minute(day.sunset().unwrap()), utc(2015, 7, 13, 0, 32));
    assert_eq!(minute(dusk), utc(2015, 7, 13, 1, 57));
}

#[test]
fn raleigh_afternoon_shadow_times() {
    let day = compute_day_events(date(2015, 7, 12), &raleigh()).unwrap();
    assert_abs_diff_eq!(day.afternoon(1.0).unwrap().value(), 21.147_73, epsilon = 1e-4);
    assert_abs_diff_eq!(day.afternoon(2.0).unwrap().value(), 22.369_02, epsilon = 1e-4);
}

#[test]
fn san_francisco_transit_is_near_local_solar_noon() {
    let sf = Coordinates::new(37.7749, -122.4194).unwrap();
    let local_noon = 12.0 - sf.longitude().value() / 15.0;

    for d in [date(2024, 3, 20), date(2024, 6, 21), date(2024, 12, 21)] {
        let day = compute_day_events(d, &sf).unwrap();
        let sunrise = day.sunrise().unwrap();
        let sunset = day.sunset().unwrap();

        assert!(sunrise < day.transit() && day.transit() < sunset, "{d}");
        // The equation of time never exceeds about 17 minutes.
        assert!(
            (day.transit().value() - local_noon).abs() < 0.3,
            "{d}: transit {} vs {local_noon}",
            day.transit()
        );
    }
}

#[test]
fn polar_elevations_are_reported_as_no_event() {
    let pole = Coordinates::new(89.5, 0.0).unwrap();
    let day = compute_day_events(date(2024, 6, 21), &pole).unwrap();

    for elevation in [-18.0, -0.8333, 10.0] {
        let err = hour_angle_crossing(&day, Degrees::new(elevation), false).unwrap_err();
        assert!(matches!(err, SolarError::NoEvent { .. }), "{err}");
    }

    let south = Coordinates::new(-89.5, 0.0).unwrap();
    let day = compute_day_events(date(2024, 6, 21), &south).unwrap();
    assert!(day.sunrise().unwrap_err().is_no_event());
}

#[test]
fn high_latitude_fallbacks_stay_before_sunrise() {
    let place = Coordinates::new(60.0, 10.0).unwrap();
    let d = date(2024, 6, 21);
    let day = compute_day_events(d, &place).unwrap();

    let fajr = day.crossing(Horizon::AstronomicalTwilight, false);
    assert!(fajr.unwrap_err().is_no_event());

    let sunrise = day.to_utc(day.sunrise().unwrap()).unwrap();
    let night = day.night().unwrap();

    let portions = HighLatitudeRule::SeventhOfNight
        .night_portions(Degrees::new(-18.0), Degrees::new(-17.0));
    let by_night = portions.safe_morning(sunrise, night).unwrap();

    let doy = day_of_year(d.year(), d.month(), d.day()).unwrap();
    let seasonal =
        twilight_safeguard(place.latitude(), doy, d.year(), sunrise, Twilight::Morning).unwrap();

    assert!(by_night < sunrise);
    assert!(seasonal < sunrise);
    // 60°N at the solstice: the seasonal curve allows well over an hour.
    assert!((sunrise - seasonal).num_minutes() > 90);
}

#[test]
fn grazing_sunset_is_not_reported_before_transit() {
    let place = Coordinates::new(85.1, 0.0).unwrap();
    let day = compute_day_events(date(2024, 9, 12), &place).unwrap();

    let sunset = day.crossing(Horizon::SunriseSunset, true);
    assert!(matches!(sunset, Err(SolarError::NoEvent { .. })), "{sunset:?}");
    assert!(day.night().is_none());

    // Further into autumn any sunset found still falls after noon.
    let next = compute_day_events(date(2024, 9, 20), &place).unwrap();
    if let Ok(sunset) = next.sunset() {
        assert!(sunset > next.transit());
    }
}

#[test]
fn meeus_example_25a_through_public_api() {
    let jd = JulianDate::from_calendar_checked(1992, 10, 13).unwrap();
    assert_eq!(jd.value(), 2_448_908.5);
    let pos = compute_solar_position(jd);
    assert_abs_diff_eq!(pos.declination.value(), -7.785_07, epsilon = 1e-4);
    assert_abs_diff_eq!(pos.right_ascension.value(), 198.380_83, epsilon = 1e-4);
}

#[test]
fn invalid_inputs_are_rejected_at_the_boundary() {
    assert!(matches!(
        Coordinates::new(120.0, 0.0),
        Err(SolarError::InvalidCoordinates { .. })
    ));
    assert!(matches!(
        JulianDate::from_calendar_checked(2023, 2, 29),
        Err(SolarError::InvalidDate { .. })
    ));
}

#[cfg(feature = "serde")]
#[test]
fn serde_day_inputs_roundtrip() {
    let sf = Coordinates::new(37.7749, -122.4194).unwrap();
    let json = serde_json::to_string(&sf).unwrap();
    let back: Coordinates = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sf);

    let day = compute_day_events(date(2024, 6, 21), &sf).unwrap();
    let positions = day.positions();
    let json = serde_json::to_string(&positions.current).unwrap();
    assert!(json.contains("declination"));
    assert!(json.contains("apparent_sidereal_time"));
}

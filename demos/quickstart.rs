use chrono::{Datelike, Utc};
use heliotime::julian::day_of_year;
use heliotime::{
    compute_day_events, round_to_minute, twilight_safeguard, Coordinates, Horizon, SolarResult,
    Twilight,
};
use qtty::Hours;

fn main() -> SolarResult<()> {
    env_logger::init();

    let san_francisco = Coordinates::new(37.7749, -122.4194)?;
    let today = Utc::now().date_naive();
    let day = compute_day_events(today, &san_francisco)?;

    let show = |label: &str, hours: SolarResult<Hours>| match hours {
        Ok(h) => match day.to_utc(h).and_then(round_to_minute) {
            Some(t) => println!("{label:>12}: {t}"),
            None => println!("{label:>12}: out of range"),
        },
        Err(err) => println!("{label:>12}: {err}"),
    };

    println!("{today} at {san_francisco}");
    println!("Sun: {}", day.positions().current);
    show("dawn", day.crossing(Horizon::AstronomicalTwilight, false));
    show("sunrise", day.sunrise());
    show("transit", Ok(day.transit()));
    show("afternoon", day.afternoon(1.0));
    show("sunset", day.sunset());
    show("dusk", day.crossing(Horizon::AstronomicalTwilight, true));

    if let (Ok(sunrise), Some(doy)) = (
        day.sunrise(),
        day_of_year(today.year(), today.month(), today.day()),
    ) {
        if let Some(earliest) = day.to_utc(sunrise).and_then(|instant| {
            twilight_safeguard(
                san_francisco.latitude(),
                doy,
                today.year(),
                instant,
                Twilight::Morning,
            )
        }) {
            println!("{:>12}: {earliest}", "safeguard");
        }
    }

    Ok(())
}

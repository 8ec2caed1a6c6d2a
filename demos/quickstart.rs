use calzone::tz::{
    DaylightSaving, InMemoryProvider, RecurringRules, RuleDay, TimeZoneRules, TransitionClock,
    TransitionRule,
};
use calzone::{
    Date, DateRange, DateTime, DayOfWeek, Duration, Error, Instant, Interval, Month, Period,
    RoundingMode, SystemClock, TimeUnit, TimeZone, UtcOffset, WeekSettings, YearMonth,
    ZonedDateTime,
};

fn main() -> Result<(), Error> {
    let sunday = DayOfWeek::Sunday;
    let daylight = DaylightSaving {
        offset: UtcOffset::from_hms(-4, 0, 0)?,
        start: TransitionRule::new(
            Month::March,
            RuleDay::NthWeekday { n: 2, weekday: sunday },
            7_200,
            TransitionClock::Wall,
        )?,
        end: TransitionRule::new(
            Month::November,
            RuleDay::NthWeekday { n: 1, weekday: sunday },
            7_200,
            TransitionClock::Wall,
        )?,
    };
    let provider = InMemoryProvider::new("demo").with_region(
        "America/New_York",
        RecurringRules::new(UtcOffset::from_hms(-5, 0, 0)?, daylight)?,
    );
    let zone = TimeZone::region("America/New_York", &provider)?;

    let now = Instant::now(&SystemClock::utc());
    println!("now: {now}");
    println!("in New York: {}", now.at_zone(zone.clone())?);

    let date = Date::new(2018, 1, 31)?;
    println!("{date} + 1 month = {}", date.checked_add_months(1)?);
    println!("{date} is in ISO week {}", date.to_week_date(WeekSettings::ISO));

    let gap: DateTime = "2018-03-11T02:30".parse()?;
    println!("{gap} has {} valid offsets", zone.rules().valid_offsets_at(gap).len());
    println!("resolved: {}", ZonedDateTime::from_local(gap, zone.clone())?);

    let range: DateRange = "2018-01-31/2018-04-30".parse()?;
    for day in range.step_months(2)? {
        println!("every other month: {day}");
    }
    println!("{range} spans {}", range.as_period()?);
    println!("P14M3D normalized: {}", Period::new(0, 14, 3).normalized()?);

    let meeting = ZonedDateTime::from_local("2018-03-09T16:40".parse()?, zone.clone())?;
    println!("next Monday: {}", meeting.next(DayOfWeek::Monday)?);
    println!("quarter hour: {}", meeting.rounded_to_increment(Duration::of_minutes(15)?, RoundingMode::HalfUp)?);
    println!("truncated to the day: {}", meeting.truncated_to(TimeUnit::Days)?);

    let month: YearMonth = "2018-03".parse()?;
    let span = Interval::new(month.start_date().start_of_day_at(zone.clone())?, month.end_date().end_of_day_at(zone)?);
    for week in span.step_period(Period::of_weeks(1)?)? {
        println!("week starting {week}");
    }
    Ok(())
}

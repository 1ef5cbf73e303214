#![allow(unused)]
use aged::*;
mod timepart;
use timepart::TimePart;
use std::io::Write;
use std::os::unix::net::UnixStream;

const CMD_SOCKET_NAME: &str = "aged.cmd";

type Anything<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(clap::Parser, Debug)]
struct Cli {
    /// path to the daemon's command socket
    #[clap(short = 's', long = "socket")]
    socket: Option<std::path::PathBuf>,
    #[clap(subcommand)]
    cmd: CtlCommand,
}

#[derive(clap::Subcommand, Debug)]
enum CtlCommand {
    /// add an entry; the time spec says when it happened
    Add {
        name: String,
        #[clap(required = true)]
        timespec: Vec<String>,
    },
    /// remove entries by name
    Remove { name: String },
    /// remove all entries
    Clear,
}

fn prev_day(dt: tz::DateTime) -> Result<tz::DateTime, tz::error::TzError> {
    let us = dt.unix_time() - 86400;
    let ltt = dt.local_time_type().clone();
    Ok(tz::DateTime::from_timespec_and_local(us, 0, ltt)?)
}

/// walks back to the most recent day with the given weekday
fn find_weekday(starting_dt: tz::DateTime, weekday: u8) -> Result<tz::DateTime, tz::error::TzError> {
    let mut counter = 7;
    let mut dt = prev_day(starting_dt)?;
    while counter > 0 {
        if dt.week_day() == weekday { break; }
        dt = prev_day(dt)?;
        counter -= 1;
    }
    if counter == 0 {
        let e: std::io::Error = std::io::ErrorKind::InvalidInput.into();
        return Err(tz::error::TzError::from(e));
    }
    Ok(dt)
}

fn timeparts_to_unixmoment(mut current_dt: tz::DateTime, tps: &[TimePart]) -> Result<UnixMoment, tz::error::TzError> {
    // find starting day
    for tp in tps {
        match tp {
            TimePart::Yesterday => current_dt = prev_day(current_dt)?,
            TimePart::WeekDay(n) => current_dt = find_weekday(current_dt, *n)?,
            _ => continue,
        }
    }
    let mut year = current_dt.year();
    let mut month = current_dt.month();
    let mut day = current_dt.month_day();
    let mut hour = current_dt.hour();
    let mut minute = current_dt.minute();
    let mut second = current_dt.second();
    let mut ago_seconds = 0i64;

    for tp in tps {
        match tp {
            TimePart::HM(h, m) => {
                hour = *h;
                minute = *m;
                second = 0;
            },
            TimePart::MD(m, d) => {
                month = *m;
                day = *d;
            },
            TimePart::Month(m) => month = *m,
            TimePart::Year(y) => year = *y,
            TimePart::Days(d) => ago_seconds += d * 86400,
            TimePart::Hours(h) => ago_seconds += h * 3600,
            TimePart::Minutes(m) => ago_seconds += m * 60,
            TimePart::Seconds(s) => ago_seconds += s,
            _ => continue,
        }
    }
    let ltt = current_dt.local_time_type();
    let new_dt = tz::DateTime::new(year, month, day, hour, minute, second, 0, *ltt)?;
    // relative parts reach into the past
    Ok(UnixMoment::new(new_dt.unix_time() - ago_seconds))
}

fn socket_path(cli_path: Option<std::path::PathBuf>) -> Anything<std::path::PathBuf> {
    if let Some(p) = cli_path {
        return Ok(p);
    }
    let d = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| format!("socket path must be specified for {CMD_SOCKET_NAME}"))?;
    Ok([d.as_str(), CMD_SOCKET_NAME].iter().collect())
}

fn send_command(path: &std::path::Path, cmd: &AppCommand) -> Anything<()> {
    let mut stream = UnixStream::connect(path)?;
    let mut line = serde_json::to_string(cmd)?;
    line.push('\n');
    stream.write_all(line.as_bytes())?;
    Ok(())
}

pub fn main() -> Anything<()> {
    let cli: Cli = clap::Parser::parse();
    let path = socket_path(cli.socket)?;
    let cmd = match cli.cmd {
        CtlCommand::Add { name, timespec } => {
            let tz = tz::TimeZone::local()?;
            let dt = tz::DateTime::now(tz.as_ref())?;
            let line = timespec.join(" ");
            let (_, tps) = TimePart::parse_line(&line).map_err(|_| "could not parse time spec")?;
            let stamp = timeparts_to_unixmoment(dt, tps.as_slice())?;
            AppCommand::Add(EntrySpec::new(name, stamp))
        },
        CtlCommand::Remove { name } => AppCommand::Remove(name),
        CtlCommand::Clear => AppCommand::Clear,
    };
    send_command(&path, &cmd)
}

#[cfg(test)]
mod checks {
    use super::*;

    fn fixed_dt(unix: i64) -> tz::DateTime {
        let utc = tz::LocalTimeType::utc();
        tz::DateTime::from_timespec_and_local(unix, 0, utc).unwrap()
    }

    #[test]
    fn relative_offsets_reach_into_the_past() {
        let dt = fixed_dt(1_000_000_000);
        let tps = vec![TimePart::Hours(3), TimePart::Minutes(20)];
        let um = timeparts_to_unixmoment(dt, tps.as_slice()).unwrap();
        assert_eq!(1_000_000_000 - (3 * 3600 + 20 * 60), um.seconds());
    }

    #[test]
    fn day_offsets_reach_into_the_past() {
        let dt = fixed_dt(1_000_000_000);
        let tps = vec![TimePart::Days(4)];
        let um = timeparts_to_unixmoment(dt, tps.as_slice()).unwrap();
        assert_eq!(1_000_000_000 - 4 * 86400, um.seconds());
    }

    #[test]
    fn yesterday_lands_one_day_back() {
        let dt = fixed_dt(1_000_000_000);
        let tps = vec![TimePart::Yesterday];
        let um = timeparts_to_unixmoment(dt, tps.as_slice()).unwrap();
        assert_eq!(1_000_000_000 - 86400, um.seconds());
    }
}

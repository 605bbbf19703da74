use rand::Rng;
use std::env;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;
use wind_compass::{Color, Compass, CompassCommand, CompassConfig, CompassError, CompassStyle, Result};

#[derive(Debug, Clone, PartialEq)]
struct Options {
    title: String,
    direction: f64,
    speed: f64,
    size: Option<(usize, usize)>,
    bezel_color: Option<Color>,
    pointer_color: Option<Color>,
    demo: bool,
    stdin: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            title: "Wind".to_string(),
            direction: 0.0,
            speed: 0.0,
            size: None,
            bezel_color: None,
            pointer_color: None,
            demo: false,
            stdin: false,
        }
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T> {
    let value = value.ok_or_else(|| CompassError::InvalidArgument(format!("{flag} needs a value")))?;
    value
        .parse()
        .map_err(|_| CompassError::InvalidArgument(format!("{flag}: cannot parse {value:?}")))
}

fn parse_color(flag: &str, value: Option<String>) -> Result<Color> {
    let value = value.ok_or_else(|| CompassError::InvalidArgument(format!("{flag} needs a value")))?;
    Color::from_hex(&value)
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--title" => {
                options.title = args
                    .next()
                    .ok_or_else(|| CompassError::InvalidArgument("--title needs a value".into()))?;
            }
            "--direction" => options.direction = parse_number(&arg, args.next())?,
            "--degrees" => options.direction = parse_number::<f64>(&arg, args.next())?.to_radians(),
            "--speed" => options.speed = parse_number(&arg, args.next())?,
            "--size" => {
                let width = parse_number(&arg, args.next())?;
                let height = parse_number(&arg, args.next())?;
                options.size = Some((width, height));
            }
            "--bezel-color" => options.bezel_color = Some(parse_color(&arg, args.next())?),
            "--pointer-color" => options.pointer_color = Some(parse_color(&arg, args.next())?),
            "--demo" => options.demo = true,
            "--stdin" => options.stdin = true,
            other => {
                return Err(CompassError::InvalidArgument(format!(
                    "unknown argument {other:?}"
                )))
            }
        }
    }
    Ok(options)
}

/// A line of `direction [speed]`, direction in radians.
fn parse_line(line: &str) -> Option<CompassCommand> {
    let mut fields = line.split_whitespace();
    let direction = fields.next()?.parse::<f64>().ok()?;
    match fields.next() {
        None => Some(CompassCommand::SetWindDirection(direction)),
        Some(speed) => Some(CompassCommand::SetWind(direction, speed.parse().ok()?)),
    }
}

fn spawn_stdin_reader(sender: Sender<CompassCommand>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines().map_while(|line| line.ok()) {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                None => log::warn!("ignoring input line {line:?}"),
            }
        }
        log::debug!("stdin closed");
    });
}

fn spawn_demo(sender: Sender<CompassCommand>) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        let mut direction: f64 = rng.random_range(0.0..std::f64::consts::TAU);
        loop {
            direction += rng.random_range(-0.3..0.3);
            let speed = rng.random_range(0.0..40.0);
            if sender.send(CompassCommand::SetWind(direction, speed)).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }
    });
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = parse_args(env::args().skip(1))?;
    log::debug!("{options:?}");

    let (width, height) = options.size.unwrap_or((300, 300));
    let defaults = CompassStyle::default();
    let style = CompassStyle::builder()
        .bezel_color(options.bezel_color.unwrap_or(defaults.bezel_color))
        .pointer_color(options.pointer_color.unwrap_or(defaults.pointer_color))
        .build();
    let config = CompassConfig::builder()
        .title(options.title)
        .window_width(width)
        .window_height(height)
        .style(style)
        .wind_direction(options.direction)
        .wind_speed(options.speed)
        .build();
    let mut compass = Compass::new(config);

    if !options.demo && !options.stdin {
        return compass.show();
    }

    let (sender, receiver) = mpsc::channel();
    if options.stdin {
        spawn_stdin_reader(sender.clone());
    }
    if options.demo {
        spawn_demo(sender);
    }
    compass.show_with_commands(receiver)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_flags() {
        assert_eq!(parse_args(Vec::new()).unwrap(), Options::default());
    }

    #[test]
    fn parses_all_flags() {
        let options = parse_args(args(&[
            "--title", "Pier", "--direction", "1.5", "--speed", "12", "--size", "400", "250",
            "--bezel-color", "#102030", "--pointer-color", "ff8000", "--demo", "--stdin",
        ]))
        .unwrap();
        assert_eq!(options.bezel_color, Some(Color::new(0x10, 0x20, 0x30)));
        assert_eq!(options.pointer_color, Some(Color::new(0xff, 0x80, 0x00)));
        assert_eq!(options.title, "Pier");
        assert_eq!(options.direction, 1.5);
        assert_eq!(options.speed, 12.0);
        assert_eq!(options.size, Some((400, 250)));
        assert!(options.demo && options.stdin);
    }

    #[test]
    fn malformed_colors_are_rejected() {
        assert!(matches!(
            parse_args(args(&["--bezel-color", "blue"])),
            Err(CompassError::InvalidColor(_))
        ));
        assert!(matches!(
            parse_args(args(&["--pointer-color", "#12345"])),
            Err(CompassError::InvalidColor(_))
        ));
    }

    #[test]
    fn degrees_are_converted() {
        let options = parse_args(args(&["--degrees", "180"])).unwrap();
        assert!((options.direction - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn bad_arguments_are_errors() {
        for bad in [
            args(&["--speed"]),
            args(&["--direction", "north"]),
            args(&["--size", "100"]),
            args(&["--wat"]),
            args(&["--pointer-color"]),
        ] {
            assert!(matches!(
                parse_args(bad),
                Err(CompassError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn input_lines() {
        assert_eq!(
            parse_line("0.25"),
            Some(CompassCommand::SetWindDirection(0.25))
        );
        assert_eq!(
            parse_line("  3.0   14.5 "),
            Some(CompassCommand::SetWind(3.0, 14.5))
        );
        assert_eq!(parse_line("east"), None);
        assert_eq!(parse_line("1.0 fast"), None);
        assert_eq!(parse_line(""), None);
    }
}

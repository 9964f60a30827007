//! Tests for severity level functionality.

use streamlog::{Error, Level};

#[test]
fn level_ordering() {
    assert!(Level::All < Level::Trace);
    assert!(Level::Trace < Level::Debug);
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warn);
    assert!(Level::Warn < Level::Error);
    assert!(Level::Error < Level::Fatal);
}

#[test]
fn level_display_is_uppercase() {
    assert_eq!(Level::All.to_string(), "ALL");
    assert_eq!(Level::Trace.to_string(), "TRACE");
    assert_eq!(Level::Debug.to_string(), "DEBUG");
    assert_eq!(Level::Info.to_string(), "INFO");
    assert_eq!(Level::Warn.to_string(), "WARN");
    assert_eq!(Level::Error.to_string(), "ERROR");
    assert_eq!(Level::Fatal.to_string(), "FATAL");
}

#[test]
fn level_from_str() {
    assert_eq!("all".parse::<Level>().unwrap(), Level::All);
    assert_eq!("TRACE".parse::<Level>().unwrap(), Level::Trace);
    assert_eq!("Debug".parse::<Level>().unwrap(), Level::Debug);
    assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
    assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
    assert_eq!("err".parse::<Level>().unwrap(), Level::Error);
    assert_eq!("fatal".parse::<Level>().unwrap(), Level::Fatal);
}

#[test]
fn level_from_str_invalid() {
    assert!(matches!(
        "verbose".parse::<Level>(),
        Err(Error::UnknownLevel(s)) if s == "verbose"
    ));
}

#[test]
fn level_default_is_permissive() {
    assert_eq!(Level::default(), Level::All);
}

#[test]
fn level_all_lists_every_variant_in_order() {
    let all = Level::all();
    assert_eq!(all.len(), 7);
    assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
}

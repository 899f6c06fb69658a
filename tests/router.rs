//! Command routing integration tests
//!
//! Exercises the alias table exactly as the turn loop does: lower-cased
//! transcripts in, routed commands out.

use aria_assistant::{Command, CommandTable};

fn table() -> CommandTable {
    CommandTable::new().expect("default alias table must build")
}

#[test]
fn every_command_family_is_reachable() {
    let table = table();

    let cases = [
        ("hello", Command::Greeting),
        ("bye", Command::Farewell),
        ("search", Command::WebSearch),
        ("video", Command::VideoSearch),
        ("wikipedia", Command::Encyclopedia),
        ("translate", Command::Translate),
        ("language", Command::SwitchLanguage),
        ("weather", Command::Weather),
    ];

    for (token, expected) in cases {
        let routed = table.route(token).unwrap_or_else(|| panic!("{token} should route"));
        assert_eq!(routed.command, expected, "{token}");
        assert!(routed.args.is_empty(), "{token} carried no args");
    }
}

#[test]
fn russian_aliases_route_to_the_same_commands() {
    let table = table();

    assert_eq!(table.route("привет").unwrap().command, Command::Greeting);
    assert_eq!(table.route("пока").unwrap().command, Command::Farewell);
    assert_eq!(table.route("найди").unwrap().command, Command::WebSearch);
    assert_eq!(table.route("погода").unwrap().command, Command::Weather);
    assert_eq!(table.route("переведи").unwrap().command, Command::Translate);
    assert_eq!(table.route("язык").unwrap().command, Command::SwitchLanguage);
}

#[test]
fn arguments_follow_the_command_token_in_order() {
    let table = table();

    let routed = table.route("weather tokyo").unwrap();
    assert_eq!(routed.command, Command::Weather);
    assert_eq!(routed.args, vec!["tokyo"]);

    let routed = table.route("search how to train a parrot").unwrap();
    assert_eq!(routed.command, Command::WebSearch);
    assert_eq!(routed.args, vec!["how", "to", "train", "a", "parrot"]);
}

#[test]
fn bare_weather_command_has_no_city_argument() {
    // The handler substitutes the home city; routing just reports no args
    let routed = table().route("weather").unwrap();
    assert_eq!(routed.command, Command::Weather);
    assert!(routed.args.is_empty());
}

#[test]
fn command_token_only_matches_in_first_position() {
    let table = table();

    // "weather" as an argument must not hijack an unknown leading token
    assert!(table.route("great weather today").is_none());
}

#[test]
fn unknown_utterances_are_dropped_silently() {
    let table = table();

    assert!(table.route("sing me a song").is_none());
    assert!(table.route("").is_none());
    assert!(table.route("   \t ").is_none());
}

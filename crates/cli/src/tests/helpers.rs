// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cli::Args;
use cab_dispatch::Dispatcher;
use cab_dispatch_bootstrap::load_from_str;
use clap::Parser;

/// Three idle cabs with three finished trips, all on 2024-07-25.
pub const FLEET: &str = r#"{
    "cities": [
        {"cityId": 1, "name": "New York"},
        {"cityId": 2, "name": "Boston"}
    ],
    "cabs": [
        {"cabId": 101, "cityId": 1, "cabState": "IDLE", "registeredAt": "2024-07-25T08:00:00Z"},
        {"cabId": 102, "cityId": 1, "cabState": "IDLE", "registeredAt": "2024-07-25T08:00:00Z"},
        {"cabId": 201, "cityId": 2, "cabState": "IDLE", "registeredAt": "2024-07-25T08:00:00Z"}
    ],
    "bookings": [
        {"cabId": 101, "cityId": 1, "start_time": "2024-07-25T09:00:00", "end_time": "2024-07-25T10:00:00"},
        {"cabId": 201, "cityId": 2, "start_time": "2024-07-25T09:30:00", "end_time": "2024-07-25T09:45:00"},
        {"cabId": 101, "cityId": 1, "start_time": "2024-07-25T11:00:00", "end_time": "2024-07-25T11:30:00"}
    ]
}"#;

pub fn loaded_dispatcher() -> Dispatcher {
    let mut dispatcher: Dispatcher = Dispatcher::with_seed(5);
    load_from_str(FLEET, &mut dispatcher).unwrap();
    dispatcher
}

/// Parses `command` as if typed after `cab-dispatch --data fleet.json`.
pub fn parse(command: &[&str]) -> Args {
    let mut argv: Vec<&str> = vec!["cab-dispatch", "--data", "fleet.json"];
    argv.extend_from_slice(command);
    Args::try_parse_from(argv).unwrap()
}

/// Runs `command` against `dispatcher` and returns what it printed.
pub fn run_command(dispatcher: &mut Dispatcher, command: &[&str]) -> String {
    let args: Args = parse(command);
    let mut out: Vec<u8> = Vec::new();
    args.command.execute(dispatcher, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

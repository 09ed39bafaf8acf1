//! Integration tests for the batch driver: parsing, execution, and output files.

use gator_core::config::DriverConfig;
use gator_engine::script::{ScriptRunner, output_path_for};

const SAMPLE: &str = "\
Initialize(5)
Available()
Reserve(1, 1)
Reserve(2, 1)
Cancel(1, 1)
Reserve(3, 1)
PrintReservations()
UpdatePriority(2, 2)
ReleaseSeats(2, 3)
Reserve(4, 1)
AddSeats(2)
PrintReservations()
Quit()
Available()
";

const SAMPLE_OUTPUT: &str = "\
5 Seats are made available for reservation
Total Seats Available: 5, Waitlist: 0
User 1 reserved seat 1
User 2 reserved seat 2
User 1 canceled their reservation
User 3 reserved seat 1
Seat 1, User 3
Seat 2, User 2
User 2 priority is not updated
Reservations of the Users in the range [2, 3] are released
User 4 reserved seat 1
Additional 2 Seats are made available for reservation
Seat 1, User 4
Program Terminated!!
";

#[test]
fn test_sample_script_transcript() {
    let mut runner = ScriptRunner::default();
    let transcript = runner.run(SAMPLE).expect("run");
    assert_eq!(transcript.to_string(), SAMPLE_OUTPUT);
    assert!(transcript.terminated);
    assert_eq!(transcript.commands_executed, 13);
}

#[test]
fn test_waitlist_script_transcript() {
    let script = "\
Initialize(2)
Reserve(1, 1)
Reserve(2, 1)
Reserve(3, 2)
Reserve(4, 3)
Reserve(5, 1)
UpdatePriority(5, 4)
ExitWaitlist(3)
ExitWaitlist(3)
Cancel(2, 1)
Cancel(1, 1)
ReleaseSeats(2, 2)
Available()
AddSeats(1)
Quit()
";
    let expected = "\
2 Seats are made available for reservation
User 1 reserved seat 1
User 2 reserved seat 2
User 3 is added to the waiting list
User 4 is added to the waiting list
User 5 is added to the waiting list
User 5 priority has been updated to 4
User 3 is removed from the waiting list
User 3 is not in waitlist
User 1 has no reservation for seat 2 to cancel
User 1 canceled their reservation
User 5 reserved seat 1
Reservations of the Users in the range [2, 2] are released
User 4 reserved seat 2
Total Seats Available: 0, Waitlist: 0
Additional 1 Seats are made available for reservation
Program Terminated!!
";
    let mut runner = ScriptRunner::new(DriverConfig {
        verify_invariants: true,
        ..Default::default()
    });
    assert_eq!(runner.run(script).expect("run").to_string(), expected);
    assert_eq!(runner.engine().available(), 1);
}

#[test]
fn test_script_with_malformed_lines() {
    let script = "Initialize(1)\nReserve(1)\nFly(2, 3)\nReserve(1, 1)\n";
    let mut runner = ScriptRunner::default();
    let transcript = runner.run(script).expect("lenient run");
    assert_eq!(transcript.skipped, 2);
    assert!(!transcript.terminated);
    assert_eq!(
        transcript.to_string(),
        "1 Seats are made available for reservation\nUser 1 reserved seat 1\n"
    );

    let mut strict = ScriptRunner::new(DriverConfig {
        stop_on_parse_error: true,
        ..Default::default()
    });
    assert!(strict.run(script).is_err());
}

#[test]
fn test_transcript_written_next_to_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("test1.txt");
    std::fs::write(&input, SAMPLE).expect("write input");

    let script = std::fs::read_to_string(&input).expect("read input");
    let output = output_path_for(&input, &DriverConfig::default().output_suffix);
    let transcript = ScriptRunner::default().run(&script).expect("run");
    std::fs::write(&output, transcript.to_string()).expect("write output");

    assert_eq!(output, dir.path().join("test1_output_file.txt"));
    assert_eq!(
        std::fs::read_to_string(&output).expect("read output"),
        SAMPLE_OUTPUT
    );
}

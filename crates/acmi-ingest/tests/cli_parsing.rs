use clap::Parser;

#[path = "../src/cli.rs"]
mod cli;

#[test]
fn defaults_match_the_real_tacview_port_and_batch_size() {
    let args = cli::Args::parse_from([
        "acmi-ingest",
        "--database-url",
        "postgresql://localhost/acmi",
    ]);
    assert_eq!(args.port, 42_674);
    assert_eq!(args.batch_size, 500_000);
    assert!(!args.overwrite);
}

#[test]
fn overwrite_and_max_iters_flags_parse() {
    let args = cli::Args::parse_from([
        "acmi-ingest",
        "--database-url",
        "postgresql://localhost/acmi",
        "--overwrite",
        "--max-iters",
        "100",
    ]);
    assert!(args.overwrite);
    assert_eq!(args.max_iters, Some(100));
}

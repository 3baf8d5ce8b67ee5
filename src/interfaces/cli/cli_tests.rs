use clap::Parser;

use crate::interfaces::cli::{assemble_input, Cli};

#[test]
fn test_interfaces_cli_parse() {
    let cli = Cli::try_parse_from(["solharm", "-c", "job.yml", "-o", "job", "-l", "G"]).unwrap();
    assert_eq!(cli.config.unwrap().to_str(), Some("job.yml"));
    assert_eq!(cli.output.unwrap().to_str(), Some("job"));
    assert_eq!(cli.max_degree, Some(4));

    let cli = Cli::try_parse_from(["solharm", "--max-degree", "12"]).unwrap();
    assert_eq!(cli.max_degree, Some(12));
    assert!(cli.config.is_none());

    assert!(Cli::try_parse_from(["solharm", "--max-degree", "Q"]).is_err());
    assert!(Cli::try_parse_from(["solharm", "--max-degree", "100"]).is_err());
}

#[test]
fn test_interfaces_cli_assemble_input() {
    let cli = Cli::try_parse_from(["solharm"]).unwrap();
    let inp = assemble_input(&cli).unwrap();
    assert_eq!(inp.evaluation.max_degree, 15);

    let cli = Cli::try_parse_from(["solharm", "-l", "d"]).unwrap();
    let inp = assemble_input(&cli).unwrap();
    assert_eq!(inp.evaluation.max_degree, 2);

    let cli = Cli::try_parse_from(["solharm", "-c", "/nonexistent/job.yml"]).unwrap();
    assert!(assemble_input(&cli).is_err());
}

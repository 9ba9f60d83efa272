use crate::io::OutputFormat;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "locreport")]
#[command(about = "Aggregate per-product cloc reports into LOC summaries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate cloc reports and print the summary tables
    Report {
        /// Configuration file (defaults to the nearest .locreport.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Product to include, as NAME or NAME=PATH; repeatable, replaces configured products
        #[arg(short, long = "product", value_name = "NAME[=PATH]")]
        products: Vec<String>,

        /// Directory holding <name>LOCReport.xml files
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_command() {
        let cli = Cli::parse_from([
            "locreport",
            "-vv",
            "report",
            "--product",
            "api=out/api.xml",
            "-p",
            "web",
            "--reports-dir",
            "cloc",
            "-f",
            "json",
            "-o",
            "report.json",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Report {
                config,
                products,
                reports_dir,
                format,
                output,
            } => {
                assert_eq!(products, vec!["api=out/api.xml", "web"]);
                assert_eq!(reports_dir, Some(PathBuf::from("cloc")));
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(output, Some(PathBuf::from("report.json")));
                assert!(config.is_none());
            }
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn format_defers_to_config_when_omitted() {
        let cli = Cli::parse_from(["locreport", "report"]);
        match cli.command {
            Commands::Report {
                format, products, ..
            } => {
                assert!(format.is_none());
                assert!(products.is_empty());
            }
            _ => panic!("Expected Report command"),
        }
    }

    #[test]
    fn parses_init_command() {
        let cli = Cli::parse_from(["locreport", "init", "--force"]);
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["locreport", "report", "-f", "html"]).is_err());
    }
}

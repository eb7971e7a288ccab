use super::{TS_FORMAT, VERSION};
use chrono::prelude::*;
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of the benchmark history.
pub fn parse_cli() -> (PathBuf, PathBuf) {
    let arg_csvin = Arg::with_name("csv_file")
        .help("path of the benchmark history csv")
        .index(1)
        .default_value("results/benchmark_history.csv");
    let arg_svgout = Arg::with_name("svg_out")
        .help("path of the output svg chart")
        .index(2);
    let cli_args = App::new("bench_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the latency benchmark history")
        .arg(arg_csvin)
        .arg(arg_svgout)
        .get_matches();
    let csvin = PathBuf::from(cli_args.value_of("csv_file").unwrap_or_default());
    let svgout = match cli_args.value_of("svg_out") {
        Some(p) => PathBuf::from(p),
        None => {
            let stamp = Local::now().format(TS_FORMAT).to_string();
            PathBuf::from(format!("results/benchmark_plot_{}.svg", stamp))
        }
    };
    return (csvin, svgout);
}

//! This is the command line tool that loads '.graphml' files, assigns layers
//! to the nodes of the graph, and saves the drawing as an svg file.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{value_parser, Arg, ArgAction, Command};
use layered::backends::svg::SVGWriter;
use layered::core::utils::save_to_file;
use layered::graphml;
use layered::render::render_layout;
use layered::topo::layout::{Layout, LayoutOptions};
use std::fs;
use std::process::exit;

struct CLIOptions {
    output_path: String,
    width: Option<usize>,
    dump: bool,
    verify: bool,
}

impl CLIOptions {
    pub fn new() -> Self {
        Self {
            output_path: String::new(),
            width: None,
            dump: false,
            verify: true,
        }
    }

    pub fn layout_options(&self) -> LayoutOptions {
        let mut opt = match self.width {
            Some(width) => LayoutOptions::coffman_graham(width),
            None => LayoutOptions::min_dummies(),
        };
        opt.verify = self.verify;
        opt
    }
}

fn generate_svg(layout: &Layout, options: &CLIOptions) {
    let mut svg = SVGWriter::new();
    render_layout(layout, &mut svg);
    let content = svg.finalize();
    log::info!("Rendered {} shapes.", svg.num_shapes());

    let res = save_to_file(&options.output_path, &content);
    if let Result::Err(err) = res {
        log::error!("Could not write the file {}", options.output_path);
        log::error!("Error {}", err);
        exit(1);
    }
}

fn main() {
    let matches = Command::new("Layered")
        .version("1.x")
        .arg(
            Arg::new("width")
                .short('w')
                .long("width")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Use the Coffman-Graham layering with at most N nodes per layer"),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .action(ArgAction::SetTrue)
                .help("Print the layer and position of every node"),
        )
        .arg(
            Arg::new("no-verify")
                .long("no-verify")
                .action(ArgAction::SetTrue)
                .help("Skip the layout verification pass"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let mut cli = CLIOptions::new();
    cli.width = matches.get_one::<usize>("width").copied();
    cli.dump = matches.get_flag("dump");
    cli.verify = !matches.get_flag("no-verify");
    cli.output_path = matches
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| "/tmp/out.svg".to_string());

    let input_path = match matches.get_one::<String>("INPUT") {
        Some(path) => path,
        None => exit(1),
    };
    let contents = match fs::read_to_string(input_path) {
        Ok(contents) => contents,
        Err(err) => {
            log::error!("Can't open the file {}: {}", input_path, err);
            exit(1);
        }
    };

    let layout = graphml::parse(&contents)
        .and_then(|g| g.to_layered_graph())
        .and_then(|g| g.do_it(&cli.layout_options()));

    match layout {
        Result::Err(err) => {
            log::error!("Error: {}", err);
            exit(1);
        }

        Result::Ok(layout) => {
            if cli.dump {
                print!("{}", layout.dump());
            }
            generate_svg(&layout, &cli);
        }
    }
}

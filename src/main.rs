mod app;
mod data;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Citation network dataset (JSON object with "nodes" and "links")
    #[arg(long, default_value = "data/citation_network.json")]
    citations: PathBuf,

    /// Optional co-authorship network dataset in the same format
    #[arg(long)]
    authors: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "citegraph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CiteGraphApp::new(
                cc,
                args.citations.clone(),
                args.authors.clone(),
            )))
        }),
    )
}

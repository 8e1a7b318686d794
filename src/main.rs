use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use ganpaint_editor::catalog::{image_index_from_name, ImageCatalog};
use ganpaint_editor::remote::HttpGanServer;
use ganpaint_editor::{Editor, EditorConfig, SelectionMask};

/// Remove a semantic feature from a selected region of a generated image.
#[derive(Parser)]
#[command(name = "ganpaint-editor", version)]
struct Args {
    /// Image reference: a catalog index or a church<N>.jpg path
    image: String,

    /// Semantic feature to remove from the selection, e.g. "grass"
    feature: String,

    /// File containing the 65536-character selection bitstring
    mask_file: PathBuf,

    /// Directory the regenerated JPEG is written to
    #[arg(short, long, default_value = "media/extensions/ganpaint_images")]
    out_dir: PathBuf,

    /// Generation server root URL
    #[arg(long)]
    server: Option<String>,

    /// Project whose images are edited
    #[arg(long)]
    project: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(path) => {
            println!("✅ Image has been updated successfully: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let index = args
        .image
        .parse::<usize>()
        .ok()
        .or_else(|| image_index_from_name(&args.image))
        .ok_or_else(|| {
            format!(
                "unrecognized image reference {:?} (expected a catalog index or church<N>.jpg)",
                args.image
            )
        })?;

    let catalog = ImageCatalog::default();
    let model_id = catalog.model_id(index).ok_or_else(|| {
        format!(
            "catalog has no image at index {index} ({} known images)",
            catalog.len()
        )
    })?;

    let bitstring = fs::read_to_string(&args.mask_file)?;
    let mask = SelectionMask::parse(bitstring.trim())?;

    let mut config = EditorConfig::default();
    if let Some(server) = args.server {
        config.base_url = server;
    }
    if let Some(project) = args.project {
        config.project = project;
    }

    let server = HttpGanServer::new(&config.base_url, config.timeout)?;
    let editor = Editor::new(server, config);

    // Timestamped name so concurrent edits never clobber each other
    fs::create_dir_all(&args.out_dir)?;
    let output_path = args.out_dir.join(format!(
        "church{}_{}_{}.jpg",
        index,
        args.feature,
        Utc::now().format("%Y%m%d%H%M%S")
    ));

    println!(
        "🖌️ Editing church{index}: removing {:?} from the selected region",
        args.feature
    );

    let saved = editor.apply(model_id, &args.feature, &mask, &output_path)?;
    Ok(saved)
}

mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use logger::CliLogger;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nup", about = "Step-and-repeat PDF imposition", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill sheets with copies of each source page
    Impose {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file [default: ./outfile.pdf]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Options file (JSON); flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the effective options to this JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Substrate width in mm [default: 460]
        #[arg(long)]
        substrate_width: Option<f32>,

        /// Substrate height in mm [default: 320]
        #[arg(long)]
        substrate_height: Option<f32>,

        /// Intended substrate orientation [default: landscape]
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Gutter around each copy in mm [default: 5]
        #[arg(short, long)]
        gutter: Option<f32>,

        /// Only impose the first N source pages
        #[arg(long)]
        preview: Option<usize>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Stamp sequential numbers onto copies of a template page
    Number {
        /// Template PDF (first page is used)
        template: PathBuf,

        /// Highest number; its digit count sets the zero padding ("0100" pads to 4)
        #[arg(short = 'n', long)]
        count: String,

        /// Directory for the numbered PDFs
        #[arg(short, long, default_value = pdf_nup::constants::DEFAULT_NUMBERING_DIR)]
        output_dir: PathBuf,

        /// Left edge of the number box in points
        #[arg(long, default_value = "200")]
        x: f32,

        /// Bottom edge of the number box in points
        #[arg(long, default_value = "100")]
        y: f32,

        /// Font size in points
        #[arg(long, default_value = "15")]
        font_size: f32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Landscape,
    Portrait,
}

impl From<OrientationArg> for pdf_nup::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Landscape => Self::Landscape,
            OrientationArg::Portrait => Self::Portrait,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    CliLogger::from_verbosity(cli.verbose)
        .init()
        .context("Failed to install logger")?;

    match cli.command {
        Commands::Impose {
            input,
            output,
            config,
            save_config,
            substrate_width,
            substrate_height,
            orientation,
            gutter,
            preview,
            stats_only,
        } => {
            log::debug!("given pdf: {}", input.display());

            let mut options = match &config {
                Some(path) => pdf_nup::ImpositionOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load options from {}", path.display()))?,
                None => pdf_nup::ImpositionOptions::default(),
            };
            options.input_file = input.clone();
            if let Some(output) = output {
                options.output_file = output;
            }
            if let Some(width) = substrate_width {
                options.substrate.width_mm = width;
            }
            if let Some(height) = substrate_height {
                options.substrate.height_mm = height;
            }
            if let Some(orientation) = orientation {
                options.substrate.orientation = orientation.into();
            }
            if let Some(gutter) = gutter {
                options.gutter_mm = gutter;
            }
            options.validate()?;

            if let Some(path) = save_config {
                options.save(&path).await?;
                log::info!("Saved options → {}", path.display());
            }

            let document = pdf_nup::load_pdf(&input).await?;
            let layout = pdf_nup::plan_document(&document, &options)?;
            let stats =
                pdf_nup::calculate_statistics(pdf_nup::source_pages(&document).len(), &layout)?;

            println!("Imposition Statistics:");
            println!("  Source pages: {}", stats.source_pages);
            println!(
                "  Layout: {:?}, {} x {} = {} up",
                stats.orientation, stats.columns, stats.rows, stats.copies_per_sheet
            );
            println!(
                "  Sheet size: {:.2} x {:.2} mm",
                stats.imposed_width_mm, stats.imposed_height_mm
            );
            println!(
                "  Substrate: {} x {} mm ({:?})",
                layout.substrate.width_mm, layout.substrate.height_mm, layout.substrate.orientation
            );
            println!("  Output sheets: {}", stats.output_sheets);
            println!("  Total copies: {}", stats.total_copies);
            println!("  Utilization: {:.1}%", stats.sheet_utilization * 100.0);

            if stats_only {
                return Ok(());
            }

            let imposition = match preview {
                Some(sheets) => pdf_nup::generate_preview(&document, &options, sheets).await?,
                None => pdf_nup::impose(&document, &options).await?,
            };
            pdf_nup::save_pdf(imposition.document, &options.output_file).await?;
            println!(
                "Imposed {} sheets → {}",
                imposition.sheets,
                options.output_file.display()
            );
        }

        Commands::Number {
            template,
            count,
            output_dir,
            x,
            y,
            font_size,
        } => {
            let total: usize = count
                .trim()
                .parse()
                .with_context(|| format!("Invalid count: {}", count))?;
            let options = pdf_nup::NumberingOptions {
                count: total,
                pad_width: Some(count.trim().len()),
                position_pt: (x, y),
                font_size,
                output_dir,
                ..Default::default()
            };

            let document = pdf_nup::load_pdf(&template).await?;
            let written = pdf_nup::number_to_dir(&document, &options).await?;
            println!(
                "Numbered {} copies → {}",
                written.len(),
                options.output_dir.display()
            );
        }
    }

    Ok(())
}

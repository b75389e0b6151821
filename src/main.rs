use std::path::PathBuf;

use clap::{Parser, Subcommand};

use arcgrid::perception::{
    find_axis_separator_lines, load_arc_task, primary_separator, ArcTask, DetectConfig, Grid,
};

#[derive(Parser)]
#[command(name = "arcgrid", version, about = "Inspect objects and separators in ARC task grids")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the connected components of every input grid.
    Objects {
        task: PathBuf,
        /// Colors excluded from every component.
        #[arg(long = "ignore", value_name = "COLOR")]
        ignore: Vec<u8>,
        /// Only these colors may form components.
        #[arg(long = "require", value_name = "COLOR")]
        require: Vec<u8>,
        /// Use 8-connectivity.
        #[arg(long)]
        diagonal: bool,
        /// Split components at color changes.
        #[arg(long)]
        single_color: bool,
        /// Ignore each grid's background color.
        #[arg(long)]
        foreground: bool,
    },
    /// Show separator lines and the resulting cell layout of every input grid.
    Separators { task: PathBuf },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Objects { task, ignore, require, diagonal, single_color, foreground } => {
            let task = load_arc_task(&task)?;
            let base = DetectConfig::new()
                .ignore(ignore)
                .require(require)
                .diagonal(diagonal)
                .single_color(single_color);
            for_each_input(&task, |grid| {
                let mut config = base.clone();
                if foreground {
                    config = config.ignore([grid.background_color()]);
                }
                let objects = grid.detect_objects(&config);
                println!("  {} object(s)", objects.len());
                for obj in &objects {
                    let color = obj.color.map_or_else(|| format!("{:?}", obj.colors()), |c| c.to_string());
                    println!("    color={} points={} region={}", color, obj.size(), obj.region);
                }
            });
        }
        Command::Separators { task } => {
            let task = load_arc_task(&task)?;
            for_each_input(&task, |grid| {
                match primary_separator(grid) {
                    Some(sep) => {
                        let regions = sep.cell_regions(grid);
                        let cols = regions.first().map_or(0, Vec::len);
                        println!(
                            "  color={} rows={:?} cols={:?} cells={}x{}",
                            sep.color, sep.rows, sep.cols, regions.len(), cols
                        );
                    }
                    None => {
                        let axis = find_axis_separator_lines(grid);
                        if axis.is_empty() {
                            println!("  no separators");
                        }
                        for sep in axis {
                            println!("  color={} rows={:?} cols={:?}", sep.color, sep.rows, sep.cols);
                        }
                    }
                }
            });
        }
    }
    Ok(())
}

fn for_each_input(task: &ArcTask, mut f: impl FnMut(&Grid)) {
    println!("task {}", task.id);
    let labeled = task
        .train
        .iter()
        .enumerate()
        .map(|(i, ex)| (format!("train[{}]", i), &ex.input))
        .chain(task.test.iter().enumerate().map(|(i, ex)| (format!("test[{}]", i), &ex.input)));
    for (label, grid) in labeled {
        println!("{} ({}x{}, background {})", label, grid.width(), grid.height(), grid.background_color());
        f(grid);
    }
}

/// deep1010: build the Deep1010 mapping matrix for one channel table.
///
/// Input is a JSON table of `[name, kind]` pairs.  Without override flags
/// the mapping is type-driven; with `--eog` / `--ref` / `--extra` the named
/// channels are placed explicitly and the rest by exact label match.
///
/// Output keys (safetensors):
///   mapping       [C, 90]  f32
///   column_sums   [90]     f32
///   ch_names      U8       newline-joined input names
///   layout_names  U8       newline-joined Deep1010 labels
///   layout_kinds  [90]     i32 kind code per Deep1010 slot
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use chanmap::{
    deep1010, describe_mapping, io::write_mapping, map_named_channels, map_source,
    ChannelOverrides, ChannelTable, MappingConfig,
};

#[derive(Parser, Debug)]
#[command(name = "deep1010", about = "Map a channel table onto the Deep1010 layout")]
struct Args {
    /// JSON channel table: [["Fp1", 2], ["EOG", 202], …]
    #[arg(long)]
    channels: PathBuf,

    /// EOG channel names (comma-separated; 1, 2 or 4)
    #[arg(long, value_delimiter = ',')]
    eog: Vec<String>,

    /// Reference channel names (comma-separated; 1 or 2)
    #[arg(long = "ref", value_delimiter = ',')]
    reference: Vec<String>,

    /// Extra channel names (comma-separated; up to 5, empty entries skip a slot)
    #[arg(long, value_delimiter = ',')]
    extra: Vec<String>,

    /// Keep the stim channel as the last extra channel (type-driven mode only)
    #[arg(long)]
    include_stim: bool,

    /// Output safetensors path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the mapping report
    #[arg(long)]
    describe: bool,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = args.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let table = ChannelTable::load(&args.channels)?;
    let names = table.names();
    info!("loaded {} channels from {}", names.len(), table.name);

    let explicit = !(args.eog.is_empty() && args.reference.is_empty() && args.extra.is_empty());
    let mapping = if explicit {
        if args.include_stim {
            warn!("--include-stim has no effect with --eog/--ref/--extra; name the stim channel in --extra instead");
        }
        let overrides = ChannelOverrides::new()
            .with_eog(args.eog.iter().cloned())
            .with_reference(args.reference.iter().cloned())
            .with_extra(args.extra.iter().map(|e| (!e.is_empty()).then(|| e.clone())));
        map_named_channels(&names, &overrides)?
    } else {
        let cfg = MappingConfig { exclude_stim: !args.include_stim };
        map_source(&table, &cfg)?
    };

    let mapped_rows = mapping.matrix.rows().into_iter().filter(|r| r.sum() > 0.0).count();
    info!(
        "mapped {mapped_rows}/{} channels, {} diagnostics",
        names.len(),
        mapping.diagnostics.len()
    );

    if args.describe {
        println!("{}", describe_mapping(&names, &mapping.matrix, deep1010()));
    }

    if let Some(output) = &args.output {
        write_mapping(&mapping, &names, deep1010(), output)?;
        info!("written → {}", output.display());
    }

    Ok(())
}

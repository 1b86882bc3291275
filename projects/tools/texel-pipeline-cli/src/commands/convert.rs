use crate::error::CliError;
use crate::texel_dump::TexelDumpHandler;
use crate::util::{
    collect_inputs, handle_process_entry_error, parse_address_mode, parse_format, target_path,
    Throughput,
};
use argh::FromArgs;
use bytesize::ByteSize;
use log::info;
#[cfg(feature = "multithreaded")]
use rayon::prelude::*;
use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
    time::Instant,
};
use texel_pipeline_image_api::{
    AddressMode, Bc1AlphaMode, HandlerId, ImageIo, PixelFormat, ReformatBuilder,
};

#[derive(FromArgs, Debug)]
/// Convert and resize texel dump files
#[argh(subcommand, name = "convert")]
pub struct ConvertCmd {
    /// input file, or a directory converted recursively
    #[argh(option)]
    pub input: PathBuf,

    /// output file, or a directory mirroring the input directory
    #[argh(option)]
    pub output: PathBuf,

    /// destination format, e.g. bc1, r8g8b8a8, r16g16b16a16_float [default: source format]
    #[argh(option, from_str_fn(parse_format))]
    pub format: Option<PixelFormat>,

    /// destination width [default: source width]
    #[argh(option)]
    pub width: Option<u32>,

    /// destination height [default: source height]
    #[argh(option)]
    pub height: Option<u32>,

    /// destination depth [default: source depth]
    #[argh(option)]
    pub depth: Option<u32>,

    /// address mode for reads past the source edges: clamp, wrap, mirror, mirror-once [default: clamp]
    #[argh(option, default = "AddressMode::Clamp", from_str_fn(parse_address_mode))]
    pub address: AddressMode,

    /// encode translucent texels as BC1 punch-through alpha
    #[argh(switch)]
    pub punch_through: bool,
}

impl ConvertCmd {
    fn builder(&self) -> ReformatBuilder {
        let builder = ReformatBuilder::new().address_mode_all(self.address);
        if self.punch_through {
            builder.bc1_alpha_mode(Bc1AlphaMode::PunchThrough)
        } else {
            builder
        }
    }
}

pub fn handle_convert_command(cmd: ConvertCmd) -> Result<(), Box<dyn std::error::Error>> {
    let files = collect_inputs(&cmd.input)?;
    if files.is_empty() {
        println!("No files found in input directory.");
        return Ok(());
    }
    println!("Found {} files to convert\n", files.len());

    let mut io = ImageIo::new();
    let dump = io.register(TexelDumpHandler)?;
    let builder = cmd.builder();

    let start = Instant::now();
    let bytes_processed = AtomicU64::new(0);
    let failures = AtomicUsize::new(0);
    let process = |file: &PathBuf| {
        let result = convert_file(&io, dump, &builder, &cmd, file, &bytes_processed);
        if !handle_process_entry_error(result) {
            failures.fetch_add(1, Ordering::Relaxed);
        }
    };

    #[cfg(feature = "multithreaded")]
    files.par_iter().for_each(process);
    #[cfg(not(feature = "multithreaded"))]
    files.iter().for_each(process);

    let elapsed = start.elapsed();
    let total_bytes = bytes_processed.load(Ordering::Relaxed);
    println!("\n=== Convert Complete ===");
    println!("Time taken: {elapsed:.2?}");
    println!("Data processed: {}", ByteSize(total_bytes));
    println!("Throughput: {}", Throughput::measure(total_bytes, elapsed));

    match failures.load(Ordering::Relaxed) {
        0 => Ok(()),
        failed => Err(format!("{failed} of {} files failed to convert", files.len()).into()),
    }
}

fn convert_file(
    io: &ImageIo,
    dump: HandlerId,
    builder: &ReformatBuilder,
    cmd: &ConvertCmd,
    file: &Path,
    bytes_processed: &AtomicU64,
) -> Result<(), CliError> {
    let target = target_path(&cmd.input, &cmd.output, file);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let source = io
        .load_file(dump, file)
        .map_err(|e| CliError::in_file(file, e))?;
    bytes_processed.fetch_add(
        (source.slice_pitch() * source.depth() as usize) as u64,
        Ordering::Relaxed,
    );

    let converted = builder
        .reformat_to(
            &source,
            cmd.format.unwrap_or(source.format()),
            cmd.width.unwrap_or(source.width()),
            cmd.height.unwrap_or(source.height()),
            cmd.depth.unwrap_or(source.depth()),
        )
        .map_err(|e| CliError::in_file(file, e))?;
    io.save_file(dump, &converted, &target)
        .map_err(|e| CliError::in_file(&target, e))?;

    info!(
        "{} ({}x{}x{} {}) -> {} ({}x{}x{} {})",
        file.display(),
        source.width(),
        source.height(),
        source.depth(),
        source.format().name(),
        target.display(),
        converted.width(),
        converted.height(),
        converted.depth(),
        converted.format().name(),
    );
    Ok(())
}

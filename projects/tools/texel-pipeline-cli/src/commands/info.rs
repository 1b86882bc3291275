use crate::texel_dump::TexelDumpHandler;
use argh::FromArgs;
use bytesize::ByteSize;
use std::path::PathBuf;
use texel_pipeline_image_api::ImageIo;

#[derive(FromArgs, Debug)]
/// Print the format and layout of a texel dump file
#[argh(subcommand, name = "info")]
pub struct InfoCmd {
    /// texel dump file
    #[argh(option)]
    pub input: PathBuf,
}

pub fn handle_info_command(cmd: InfoCmd) -> Result<(), Box<dyn std::error::Error>> {
    let mut io = ImageIo::new();
    let dump = io.register(TexelDumpHandler)?;
    let image = io.load_file(dump, &cmd.input)?;
    let info = image.format().info()?;

    println!("File: {}", cmd.input.display());
    println!("Format: {} (id {})", image.format().name(), image.format().to_id());
    println!(
        "Dimensions: {}x{}x{}",
        image.width(),
        image.height(),
        image.depth()
    );
    if info.is_compressed() {
        println!(
            "Blocks: {}x{} of {} bytes",
            info.units_wide(image.width()),
            info.units_high(image.height()),
            info.footprint.bytes
        );
    }
    println!("Row pitch: {} bytes", image.row_pitch());
    println!("Slice pitch: {} bytes", image.slice_pitch());
    println!(
        "Texel data: {}",
        ByteSize((image.slice_pitch() * image.depth() as usize) as u64)
    );
    Ok(())
}

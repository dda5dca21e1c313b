//! Decode an `.xnb` container and export its primary asset.
//!
//! ```text
//! RUST_LOG=debug cargo run --example xnb_extract --features compression -- Content/wall.xnb out/wall
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use xnbkit::Result;
use xnbkit::formats::xnb::XnbFile;
use xnbkit::readers::TypeReaderRegistry;
use xnbkit::value::Value;

fn run(input: PathBuf, output: PathBuf) -> Result<()> {
    let registry = TypeReaderRegistry::standard()?;
    let data = fs::read(&input)?;
    let xnb = XnbFile::parse(&data, &registry)?;

    println!(
        "{}: v{} {:?}, {} readers, {} shared",
        input.display(),
        xnb.header.version,
        xnb.header.platform,
        xnb.readers.len(),
        xnb.shared.len()
    );
    for (name, version) in &xnb.readers {
        println!("  reader {name} (v{version})");
    }

    let written = match &xnb.primary {
        Value::Texture2D(t) => {
            println!("{t}");
            t.export(&output)?.into_iter().collect()
        }
        Value::Texture3D(t) => {
            println!("{t}");
            t.export(&output)?
        }
        Value::TextureCube(t) => {
            println!("{t}");
            t.export(&output)?
        }
        Value::SpriteFont(f) => {
            println!("{f}");
            f.export(&output)?
        }
        Value::Effect(e) => {
            println!("{e}");
            vec![e.export(&output)?]
        }
        Value::IndexBuffer(b) => {
            println!("{b}");
            Vec::new()
        }
        other => {
            println!("{other:#?}");
            Vec::new()
        }
    };

    for file in written {
        println!("wrote {}", file.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args_os().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        eprintln!("usage: xnb_extract <input.xnb> <output-base>");
        return ExitCode::from(2);
    };

    match run(input.into(), output.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

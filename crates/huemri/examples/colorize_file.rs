use huemri::{Colorizer, Modality, ProcessingParams, SubType};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <input.png> <out.png> [colormap] [report.json]",
            args[0]
        );
        std::process::exit(2);
    }

    let mut params = ProcessingParams::for_modality(Modality::Mri);
    params.sub_type = SubType::Field3T;
    if let Some(name) = args.get(3) {
        params.colormap = name.parse()?;
    }

    let colorizer = Colorizer::with_params(params);
    let processed = colorizer.process_file(Path::new(&args[1]))?;
    processed.image.save(&args[2])?;

    let r = &processed.report;
    println!(
        "Colorized {}x{} {} {} image with '{}' (clip {:?}, gamma {:?}, blend {:?}).",
        r.image_size[0],
        r.image_size[1],
        r.modality,
        r.sub_type,
        r.colormap,
        r.clip_limit,
        r.effective_gamma,
        r.blend
    );

    if let Some(out_path) = args.get(4) {
        let json = serde_json::to_string_pretty(r)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}

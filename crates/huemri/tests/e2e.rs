mod common;

use common::synthetic_image::{phantom_u8, scratch_dir};
use huemri::{
    apply_colormap, blend_with_original, Colorizer, Colormap, Modality, ProcessingParams,
    Session, SubType,
};
use image::GrayImage;

#[test]
fn flat_xray_bone_blend_end_to_end() {
    let gray = GrayImage::from_pixel(100, 100, image::Luma([128]));
    let params = ProcessingParams {
        modality: Modality::Xray,
        sub_type: SubType::Standard,
        colormap: Colormap::Bone,
        blend: 0.3,
        gamma: 1.0,
        enhance: false,
    };
    let out = Colorizer::with_params(params).process(&gray).unwrap();

    let colored = apply_colormap(&gray, Colormap::Bone).unwrap();
    let expected = blend_with_original(&gray, &colored, 0.3).unwrap();
    assert_eq!(out.image, expected);

    // single color everywhere
    let first = *out.image.get_pixel(0, 0);
    assert!(out.image.pixels().all(|p| *p == first));
}

#[test]
fn file_round_trip_through_session() {
    let dir = scratch_dir("session");
    let path = dir.join("phantom.png");
    phantom_u8(96, 80).save(&path).unwrap();

    let mut session = Session::new(ProcessingParams::for_modality(Modality::Ct));
    assert!(session.process().unwrap().is_none());

    session.load(&path).unwrap();
    let out = session.process().unwrap().unwrap();
    assert_eq!(out.image.dimensions(), (96, 80));
    assert_eq!(out.report.modality, Modality::Ct);
    assert_eq!(out.report.sub_type, SubType::Standard);
    assert_eq!(out.report.clip_limit, Some(0.03));

    // a broken file leaves the phantom in place
    let broken = dir.join("broken.png");
    std::fs::write(&broken, b"not a png").unwrap();
    assert!(session.load(&broken).is_err());
    assert_eq!(session.current().unwrap().dimensions(), (96, 80));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn every_menu_palette_runs_for_every_sub_type() {
    let gray = phantom_u8(48, 40);
    for m in Modality::ALL {
        for &sub_type in m.sub_types() {
            for &colormap in m.colormaps() {
                let params = ProcessingParams {
                    modality: m,
                    sub_type,
                    colormap,
                    gamma: 1.3,
                    ..ProcessingParams::default()
                };
                let out = Colorizer::with_params(params).process(&gray).unwrap();
                assert_eq!(out.image.dimensions(), (48, 40), "{m} {sub_type} {colormap}");
            }
        }
    }
}

#[test]
fn colorizer_reads_params_file() {
    let dir = scratch_dir("params");
    let params_path = dir.join("params.json");
    std::fs::write(
        &params_path,
        r#"{"modality":"mri","sub_type":"3T","colormap":"viridis","blend":0.0}"#,
    )
    .unwrap();
    let image_path = dir.join("phantom.png");
    phantom_u8(64, 64).save(&image_path).unwrap();

    let params = ProcessingParams::from_json_file(&params_path).unwrap();
    let out = Colorizer::with_params(params)
        .process_file(&image_path)
        .unwrap();
    assert_eq!(out.report.colormap, Colormap::Viridis);
    assert_eq!(out.report.clip_limit, Some(0.05));
    assert_eq!(out.report.blend, None);

    let json = serde_json::to_value(&out.report).unwrap();
    assert_eq!(json["sub_type"], "3T");
    assert_eq!(json["colormap"], "viridis");

    std::fs::remove_dir_all(&dir).ok();
}

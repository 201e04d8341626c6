mod common;

use std::fs;

use image::{GenericImageView, ImageFormat, Rgba};
use stepcrop::{
    BatchCropParams, BatchExpandParams, Color, Error, ErrorPolicy, OutputFormat, crop_directory,
    expand_directory, iterate_images,
};

use common::{file_names, write_image};

/// Two images, one text file and one subdirectory.
fn populate(dir: &std::path::Path) {
    write_image(dir, "a.png", 300, 200, ImageFormat::Png);
    write_image(dir, "b.jpg", 100, 200, ImageFormat::Jpeg);
    fs::write(dir.join("notes.txt"), "not an image").unwrap();
    fs::create_dir(dir.join("nested")).unwrap();
}

#[test]
fn iterate_images_lists_only_supported_files() {
    let input = tempfile::tempdir().unwrap();
    populate(input.path());

    let names: Vec<String> = iterate_images(input.path())
        .unwrap()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.png", "b.jpg"]);
}

#[test]
fn crop_keeps_formats_and_skips_non_images() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    populate(input.path());

    let params = BatchCropParams {
        aspect_ratio: Some(1.0),
        ..Default::default()
    };
    let report = crop_directory(input.path(), output.path(), &params).unwrap();

    assert_eq!((report.processed, report.skipped, report.errors), (2, 2, 0));
    assert_eq!(
        file_names(output.path()),
        vec!["a_crop_200_200.png", "b_crop_100_100.jpg"]
    );

    let a = image::open(output.path().join("a_crop_200_200.png")).unwrap();
    assert_eq!(a.dimensions(), (200, 200));
    assert_eq!(a.get_pixel(0, 0), Rgba([50, 0, 0, 255]));
}

#[test]
fn crop_converts_to_the_requested_format() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    populate(input.path());

    let params = BatchCropParams {
        aspect_ratio: None,
        format: Some(OutputFormat::Png),
        ..Default::default()
    };
    let report = crop_directory(input.path(), output.path(), &params).unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(
        file_names(output.path()),
        vec!["a_crop_300_200.png", "b_crop_100_200.png"]
    );
    let converted = fs::read(output.path().join("b_crop_100_200.png")).unwrap();
    assert_eq!(image::guess_format(&converted).unwrap(), ImageFormat::Png);
}

#[test]
fn broken_images_are_counted_or_abort() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    populate(input.path());
    fs::write(input.path().join("0_broken.png"), b"garbage").unwrap();

    let params = BatchCropParams {
        aspect_ratio: Some(1.0),
        ..Default::default()
    };
    let report = crop_directory(input.path(), output.path(), &params).unwrap();
    assert_eq!((report.processed, report.skipped, report.errors), (2, 2, 1));

    let abort = BatchCropParams {
        on_error: ErrorPolicy::Abort,
        ..params
    };
    let err = crop_directory(input.path(), output.path(), &abort).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

#[test]
fn expand_pads_onto_the_background() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    populate(input.path());

    let params = BatchExpandParams {
        aspect_ratio: 1.0,
        background: Color::Named("red".to_string()),
        format: Some(OutputFormat::Png),
        ..Default::default()
    };
    let report = expand_directory(input.path(), output.path(), &params).unwrap();

    assert_eq!((report.processed, report.skipped, report.errors), (2, 2, 0));
    assert_eq!(
        file_names(output.path()),
        vec!["a_expand_300_300.png", "b_expand_200_200.png"]
    );

    let a = image::open(output.path().join("a_expand_300_300.png")).unwrap();
    assert_eq!(a.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    assert_eq!(a.get_pixel(0, 50), Rgba([0, 0, 0, 255]));
    assert_eq!(a.get_pixel(100, 50), Rgba([100, 0, 0, 255]));
    assert_eq!(a.get_pixel(0, 249), Rgba([0, 199, 0, 255]));
    assert_eq!(a.get_pixel(0, 250), Rgba([255, 0, 0, 255]));
}

#[test]
fn expand_rejects_unknown_colors_before_writing() {
    let input = tempfile::tempdir().unwrap();
    let scratch = tempfile::tempdir().unwrap();
    let output = scratch.path().join("out");
    populate(input.path());

    let params = BatchExpandParams {
        background: Color::Named("notacolor".to_string()),
        ..Default::default()
    };
    let err = expand_directory(input.path(), &output, &params).unwrap_err();

    assert!(matches!(err, Error::InvalidColor(_)));
    assert!(!output.exists());
}

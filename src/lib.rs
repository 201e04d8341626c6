#![doc = r##"
stepcrop: aspect-ratio aware batch transforms for raster images.

The crate provides three tools behind one typed API, used by the `stepcrop` CLI and
embeddable in your own Rust applications:

- a **stepwise center-crop series** generator that emits ever smaller centered crops
  of a fixed aspect ratio until a size limit is reached,
- a batch **crop-to-ratio** tool,
- a batch **expand-to-ratio** tool that pads images onto a background color.

Codecs (JPEG, PNG, BMP, TIFF, WebP) come from the `image` and `jpeg-encoder` crates.

Add dependency
--------------
```toml
[dependencies]
stepcrop = "0.1"
```

Quick start: generate a crop series
-----------------------------------
```rust,no_run
use std::path::Path;
use stepcrop::{generate_series, SeriesParams};

fn main() -> stepcrop::Result<()> {
    let params = SeriesParams {
        step_pixels: 20,
        aspect_ratio: 16.0 / 9.0,
        min_size_ratio: 0.0025,
        min_pixel_limit: 100,
        ..Default::default()
    };

    // Writes photo_crop1_1920_1080_1.0.jpg, photo_crop2_1900_1069_0.9795.jpg, ...
    // into /data/photo_output/
    let report = generate_series(Path::new("/data/photo.jpg"), &params)?;
    println!("generated {} images", report.generated());
    Ok(())
}
```

Plan a series in memory
-----------------------
The stepping logic is pure: plan a series for any image size and inspect every frame
without touching the filesystem.

```rust
use stepcrop::{SeriesParams, SeriesPlan};

let params = SeriesParams {
    step_pixels: 5,
    aspect_ratio: 1.0,
    min_size_ratio: 0.01,
    min_pixel_limit: 50,
    ..Default::default()
};
let plan = SeriesPlan::new(500, 500, &params).unwrap();
let mut series = plan.iter();
let frames: Vec<_> = series.by_ref().collect();

assert_eq!(frames.first().unwrap().frame.width, 500);
assert_eq!(frames.last().unwrap().frame.width, 50);
assert_eq!(series.stop_report().unwrap().index, 92);
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use stepcrop::{crop_directory, expand_directory, BatchCropParams, BatchExpandParams, Color, OutputFormat};

fn main() -> stepcrop::Result<()> {
    let crop = BatchCropParams {
        aspect_ratio: Some(1.0),
        format: Some(OutputFormat::Png),
        ..Default::default()
    };
    let report = crop_directory(Path::new("/photos/in"), Path::new("/photos/square"), &crop)?;
    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);

    let expand = BatchExpandParams {
        aspect_ratio: 4.0 / 3.0,
        background: Color::Hex("#2181A1".to_string()),
        ..Default::default()
    };
    expand_directory(Path::new("/photos/in"), Path::new("/photos/framed"), &expand)?;
    Ok(())
}
```

Error handling
--------------
All public functions return `stepcrop::Result<T>`; match on `stepcrop::Error` to handle
specific cases. Invalid parameters are rejected before any file is touched.

```rust,no_run
use std::path::Path;
use stepcrop::{generate_series, Error, SeriesParams};

fn main() {
    match generate_series(Path::new("/photos/missing.png"), &SeriesParams::new(10, 1.0)) {
        Ok(report) => println!("{} images", report.generated()),
        Err(Error::Read { path, source }) => eprintln!("cannot read {}: {source}", path.display()),
        Err(Error::Save { index, path, .. }) => eprintln!("frame {index} failed at {}", path.display()),
        Err(other) => eprintln!("error: {other}"),
    }
}
```

Useful modules
--------------
- [`api`]: high-level entry points.
- [`core`]: geometry, the series state machine, colors, parameters, transforms.
- [`io`]: image reader, output naming, encoders and report sidecars.
- [`types`]: shared enums (`OutputFormat`, `ErrorPolicy`).
- [`error`]: crate-level `Error` and `Result`.
"##]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::color::Color;
pub use crate::core::geometry::CropFrame;
pub use crate::core::params::{BatchCropParams, BatchExpandParams, SeriesParams};
pub use crate::core::series::{
    CropSeries, LimitViolation, SeriesItem, SeriesLimits, SeriesPlan, SeriesState, Step,
    StopPhase, StopReport,
};
pub use crate::error::{Error, Result};
pub use crate::types::{ErrorPolicy, OutputFormat, parse_ratio};

// Single-pass transforms and codecs
pub use crate::core::processing::{crop_series_item, crop_to_ratio, expand_to_ratio};
pub use crate::io::SourceImage;
pub use crate::io::writers::{convert_format, save_image};

// High-level API re-exports
pub use crate::api::{
    BatchReport, FailedFrame, SavedFrame, SeriesReport, crop_directory, expand_directory,
    generate_series, iterate_images, series_frames,
};

//! End-to-end tests: synthetic frame → shrink → PNG → decode.

mod common;

use common::{MockCapture, pattern, synthetic_frame};
use shot_scale::{Bounds, Size};
use x_screenshot::capture::ChannelLayout;
use x_screenshot::config::ShotConfig;
use x_screenshot::processing::{Schedule, shrink_frame};
use x_screenshot::serialize::encode_png;

/// 4x4 frame: red counts up in steps of 16, green mirrors it, blue grows
/// toward the bottom-right corner.
fn quadrant_rgb(x: u32, y: u32) -> [u8; 3] {
    let r = (16 * (y * 4 + x)) as u8;
    [r, 255 - r, ((x + y) * 10) as u8]
}

fn floor_mean(values: impl Iterator<Item = u8>) -> u8 {
    let (sum, n) = values.fold((0u32, 0u32), |(s, n), v| (s + u32::from(v), n + 1));
    (sum / n) as u8
}

#[test]
fn test_4x4_to_2x2_quadrant_means_round_trip_through_png() {
    let frame = synthetic_frame(4, 4, ChannelLayout::BGRX, quadrant_rgb);
    let image = shrink_frame(&frame, Bounds::new(Some(2), None), Schedule::Parallel).unwrap();
    assert_eq!(image.size(), Size::new(2, 2));

    for qy in 0..2 {
        for qx in 0..2 {
            let quadrant: Vec<[u8; 3]> = [(0, 0), (1, 0), (0, 1), (1, 1)]
                .iter()
                .map(|&(dx, dy)| quadrant_rgb(qx * 2 + dx, qy * 2 + dy))
                .collect();
            let expected = [0, 1, 2].map(|c| floor_mean(quadrant.iter().map(|px| px[c])));
            assert_eq!(image.pixel(qx, qy), expected, "quadrant ({qx}, {qy})");
        }
    }
    // top-left quadrant worked by hand
    assert_eq!(image.pixel(0, 0), [40, 215, 10]);

    let png = encode_png(&image).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (2, 2));
    assert_eq!(decoded.as_raw(), &image.data);
}

#[test]
fn test_unbounded_capture_is_lossless() {
    let frame = synthetic_frame(9, 5, ChannelLayout::BGRX, pattern);
    let mut source = MockCapture::new(frame);

    let mut png: Vec<u8> = Vec::new();
    x_screenshot::capture_png(&mut source, &ShotConfig::default(), &mut png).unwrap();
    assert_eq!(source.grabs, 1);

    let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (9, 5));
    for (x, y, px) in decoded.enumerate_pixels() {
        assert_eq!(px.0, pattern(x, y), "pixel ({x}, {y})");
    }
}

#[test]
fn test_channel_layouts_decode_to_same_rgb() {
    let bgrx = synthetic_frame(12, 8, ChannelLayout::BGRX, pattern);
    let xrgb = synthetic_frame(12, 8, ChannelLayout::XRGB, pattern);
    let bounds = Bounds::new(Some(5), Some(5));

    let a = shrink_frame(&bgrx, bounds, Schedule::Parallel).unwrap();
    let b = shrink_frame(&xrgb, bounds, Schedule::Parallel).unwrap();
    assert_eq!(a.size(), Size::new(5, 3));
    assert_eq!(a, b);
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shot.png");

    let frame = synthetic_frame(64, 36, ChannelLayout::BGRX, pattern);
    let config = ShotConfig {
        max_height: Some(9),
        output: Some(path.clone()),
        ..ShotConfig::default()
    };
    x_screenshot::capture_to_output(&mut MockCapture::new(frame), &config).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (16, 9));
}

#[test]
fn test_failed_capture_keeps_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shot.png");
    std::fs::write(&path, b"previous screenshot").unwrap();

    let config = ShotConfig {
        output: Some(path.clone()),
        ..ShotConfig::default()
    };
    let err = x_screenshot::capture_to_output(&mut MockCapture::failing(), &config).unwrap_err();
    assert_eq!(err.category(), "capture");
    assert_eq!(std::fs::read(&path).unwrap(), b"previous screenshot");

    // a fit that collapses fails after the grab, still before the file is touched
    let tall = synthetic_frame(1, 1000, ChannelLayout::BGRX, pattern);
    let config = ShotConfig {
        max_height: Some(1),
        ..config
    };
    let err = x_screenshot::capture_to_output(&mut MockCapture::new(tall), &config).unwrap_err();
    assert_eq!(err.category(), "config");
    assert_eq!(std::fs::read(&path).unwrap(), b"previous screenshot");
}

#[test]
fn test_encode_capture_matches_capture_png() {
    let frame = synthetic_frame(20, 10, ChannelLayout::XRGB, pattern);
    let config = ShotConfig {
        max_width: Some(10),
        ..ShotConfig::default()
    };

    let encoded = x_screenshot::encode_capture(&mut MockCapture::new(frame.clone()), &config).unwrap();
    let mut written: Vec<u8> = Vec::new();
    x_screenshot::capture_png(&mut MockCapture::new(frame), &config, &mut written).unwrap();
    assert_eq!(encoded, written);
}

#[test]
fn test_capture_failure_is_user_facing() {
    let mut png: Vec<u8> = Vec::new();
    let err = x_screenshot::capture_png(&mut MockCapture::failing(), &ShotConfig::default(), &mut png)
        .unwrap_err();
    assert_eq!(err.category(), "capture");
    assert_eq!(err.exit_code(), 1);
    assert!(png.is_empty());
}

#[test]
fn test_invalid_config_never_grabs() {
    let frame = synthetic_frame(4, 4, ChannelLayout::BGRX, pattern);
    let mut source = MockCapture::new(frame);
    let config = ShotConfig {
        max_width: Some(0),
        ..ShotConfig::default()
    };

    let err = x_screenshot::capture_png(&mut source, &config, Vec::<u8>::new()).unwrap_err();
    assert_eq!(err.category(), "config");
    assert_eq!(source.grabs, 0);
}

//! Internal invariant violations map to exit status 101, everything else to 1.

mod common;

use common::{MockCapture, pattern, synthetic_frame};
use shot_scale::{Layout, ScaleError, Size, StridedView, StridedViewMut, shrink};
use x_screenshot::capture::{Channel, ChannelLayout, RawFrame};
use x_screenshot::config::ShotConfig;
use x_screenshot::error::{FAILURE_EXIT_CODE, INTERNAL_EXIT_CODE, ShotError};
use x_screenshot::processing::{ChannelSplitter, RgbBuffer};

#[test]
fn test_target_larger_than_frame_is_internal() {
    let frame = synthetic_frame(4, 4, ChannelLayout::BGRX, pattern);
    let err = ChannelSplitter::new(&frame, Size::new(5, 4)).err().unwrap();
    assert!(err.is_internal());
    assert_eq!(err.exit_code(), INTERNAL_EXIT_CODE);
}

#[test]
fn test_scale_error_converts_to_internal() {
    let src_data = [0u8; 4];
    let mut dst_data = [0u8; 9];
    let src = StridedView::new(&src_data, 0, Layout::packed(2, 2, 1));
    let mut dst = StridedViewMut::new(&mut dst_data, 0, Layout::packed(3, 3, 1));

    let scale: ScaleError = shrink(src, &mut dst).unwrap_err();
    let err = ShotError::from(scale);
    assert_eq!(err.category(), "internal");
    assert_eq!(err.exit_code(), INTERNAL_EXIT_CODE);
    assert!(err.to_string().contains("3x3"));
    assert_eq!(dst_data, [0; 9]);
}

#[test]
fn test_wrong_destination_length_is_internal() {
    let frame = synthetic_frame(6, 6, ChannelLayout::BGRX, pattern);
    let target = Size::new(3, 3);
    let splitter = ChannelSplitter::new(&frame, target).unwrap();

    let mut short = vec![0u8; RgbBuffer::new(target).data.len() - 1];
    assert!(splitter.run_parallel(&mut short).unwrap_err().is_internal());
    assert!(splitter.run_sequential(Channel::ALL, &mut short).unwrap_err().is_internal());
}

#[test]
fn test_environment_failures_exit_with_one() {
    let mut png: Vec<u8> = Vec::new();
    let capture = x_screenshot::capture_png(&mut MockCapture::failing(), &ShotConfig::default(), &mut png)
        .unwrap_err();
    assert_eq!(capture.exit_code(), FAILURE_EXIT_CODE);

    let mut three_bytes = RawFrame::packed(vec![0; 12], 2, 2, ChannelLayout::BGRX);
    three_bytes.bytes_per_pixel = 3;
    let unsupported = x_screenshot::capture_png(
        &mut MockCapture::new(three_bytes),
        &ShotConfig::default(),
        &mut png,
    )
    .unwrap_err();
    assert_eq!(unsupported.category(), "unsupported_format");
    assert_eq!(unsupported.exit_code(), FAILURE_EXIT_CODE);
}

#[test]
fn test_channel_offset_outside_pixel_is_an_error() {
    let layout = ChannelLayout {
        red: 4,
        green: 1,
        blue: 0,
    };
    let frame = RawFrame::packed(vec![0; 2 * 2 * 4], 2, 2, layout);

    let mut png: Vec<u8> = Vec::new();
    let err = x_screenshot::capture_png(&mut MockCapture::new(frame.clone()), &ShotConfig::default(), &mut png)
        .unwrap_err();
    assert_eq!(err.category(), "unsupported_format");
    assert_eq!(err.exit_code(), FAILURE_EXIT_CODE);
    assert!(png.is_empty());

    assert!(ChannelSplitter::new(&frame, Size::new(1, 1)).is_err());
}

#[test]
fn test_degenerate_fit_is_config_error() {
    let tall = synthetic_frame(1, 1000, ChannelLayout::BGRX, pattern);
    let config = ShotConfig {
        max_height: Some(1),
        ..ShotConfig::default()
    };
    let mut png: Vec<u8> = Vec::new();
    let err = x_screenshot::capture_png(&mut MockCapture::new(tall), &config, &mut png).unwrap_err();
    assert_eq!(err.category(), "config");
    assert_eq!(err.exit_code(), FAILURE_EXIT_CODE);
    assert!(png.is_empty());
}

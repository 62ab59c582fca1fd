//! # PNG Serialization
//!
//! The serializer turns a packed RGB view into a table of row slices and
//! hands it to a [`RowCodec`]. The codec owns the bitstream and the sink.
//!
//! The only codec shipped is [`PngCodec`]: 8-bit truecolor RGB, no
//! interlacing, deflate level 3 with adaptive filtering. Rows are streamed
//! into the encoder one at a time, so the image is never copied into a
//! contiguous buffer first.

use std::io::Write;

use png::{BitDepth, ColorType, DeflateCompression, Encoder, Filter};
use shot_scale::StridedView;

use crate::error::{ShotError, ShotResult};
use crate::processing::RgbBuffer;

/// Bytes per packed RGB pixel, the only column stride the serializer accepts.
pub const RGB_COL_STRIDE: usize = 3;

/// zlib level used for the image data.
pub const DEFLATE_LEVEL: u8 = 3;

/// Encoder that consumes an image one row slice at a time.
pub trait RowCodec {
    /// Encode `rows` (each `width * 3` bytes) as a `width x height` image.
    fn encode_rows(&mut self, rows: &[&[u8]], width: u32, height: u32) -> ShotResult<()>;
}

/// PNG codec writing to `sink`.
pub struct PngCodec<W: Write> {
    sink: W,
}

impl<W: Write> PngCodec<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> RowCodec for PngCodec<W> {
    fn encode_rows(&mut self, rows: &[&[u8]], width: u32, height: u32) -> ShotResult<()> {
        let mut encoder = Encoder::new(&mut self.sink, width, height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        encoder.set_deflate_compression(DeflateCompression::Level(DEFLATE_LEVEL));
        encoder.set_filter(Filter::Adaptive);

        let mut writer = encoder.write_header()?;
        let mut stream = writer.stream_writer()?;
        for row in rows {
            stream
                .write_all(row)
                .map_err(|e| ShotError::io("write png row", e))?;
        }
        stream.finish()?;
        writer.finish()?;

        self.sink
            .flush()
            .map_err(|e| ShotError::io("flush png", e))
    }
}

/// Serialize a packed RGB `view` through `codec`.
///
/// The view's column stride must be 3; anything else is an internal error.
pub fn serialize(view: StridedView<'_>, codec: &mut impl RowCodec) -> ShotResult<()> {
    let layout = view.layout();
    if layout.col_stride != RGB_COL_STRIDE {
        return Err(ShotError::internal(
            "packed rgb view",
            format!("column stride {} is not {}", layout.col_stride, RGB_COL_STRIDE),
        ));
    }

    let rows = (0..view.rows())
        .map(|i| {
            view.row_bytes(i).ok_or_else(|| {
                ShotError::internal("packed rgb view", format!("row {} runs past the buffer", i))
            })
        })
        .collect::<ShotResult<Vec<&[u8]>>>()?;

    let (width, height) = (to_u32(view.cols())?, to_u32(view.rows())?);
    tracing::debug!(width, height, "encoding png");
    codec.encode_rows(&rows, width, height)
}

fn to_u32(extent: usize) -> ShotResult<u32> {
    u32::try_from(extent)
        .map_err(|_| ShotError::internal("png extent", format!("{} does not fit in u32", extent)))
}

/// Encode `image` as an in-memory PNG.
pub fn encode_png(image: &RgbBuffer) -> ShotResult<Vec<u8>> {
    let mut codec = PngCodec::new(Vec::new());
    serialize(image.view(), &mut codec)?;
    Ok(codec.into_inner())
}

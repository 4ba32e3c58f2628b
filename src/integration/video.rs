//! Frame sources and sinks backed by image files.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::BufReader;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, Delay, DynamicImage, ImageFormat};
use log::{debug, info, warn};

use crate::Frame;
use crate::error::{Error, Result};

/// Yields frames in playback order.
pub trait FrameSource {
    /// Next frame, or `None` once the stream is exhausted. A frame that
    /// cannot be read ends the stream.
    fn read(&mut self) -> Option<Frame>;
}

/// Persists annotated frames.
pub trait FrameSink {
    fn write(&mut self, frame: &Frame) -> Result<()>;

    /// Flush and close the output. Later writes are ignored.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Still images played back in file-name order.
#[derive(Debug)]
pub struct ImageSequence {
    paths: VecDeque<PathBuf>,
}

impl ImageSequence {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    /// Every decodable image directly inside `dir`, sorted by file name.
    pub fn from_dir(dir: &Path) -> std::io::Result<Self> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && ImageFormat::from_path(&path).is_ok() {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(Self::new(paths))
    }

    pub fn remaining(&self) -> usize {
        self.paths.len()
    }
}

impl FrameSource for ImageSequence {
    fn read(&mut self) -> Option<Frame> {
        let path = self.paths.pop_front()?;
        match image::open(&path) {
            Ok(img) => Some(img.to_rgb8()),
            Err(err) => {
                warn!("Failed to read frame {}: {}", path.display(), err);
                self.paths.clear();
                None
            }
        }
    }
}

/// Frames of an animated GIF, decoded lazily.
pub struct GifFrames {
    frames: image::Frames<'static>,
    done: bool,
}

impl GifFrames {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| Error::SourceOpen {
            source_id: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let decoder = GifDecoder::new(BufReader::new(file))?;
        Ok(Self {
            frames: decoder.into_frames(),
            done: false,
        })
    }
}

impl FrameSource for GifFrames {
    fn read(&mut self) -> Option<Frame> {
        if self.done {
            return None;
        }
        match self.frames.next() {
            Some(Ok(frame)) => Some(DynamicImage::ImageRgba8(frame.into_buffer()).to_rgb8()),
            Some(Err(err)) => {
                warn!("Failed to decode animation frame: {}", err);
                self.done = true;
                None
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Any source `open_source` can produce.
pub enum VideoSource {
    Images(ImageSequence),
    Animation(GifFrames),
}

impl FrameSource for VideoSource {
    fn read(&mut self) -> Option<Frame> {
        match self {
            Self::Images(seq) => seq.read(),
            Self::Animation(gif) => gif.read(),
        }
    }
}

/// Open a video source from a command-line identifier.
///
/// Accepts a directory of still images, a single still image or an animated
/// GIF. A purely numeric identifier names a capture device, which this build
/// cannot open.
pub fn open_source(src: &str) -> Result<VideoSource> {
    let open_err = |reason: &str| Error::SourceOpen {
        source_id: src.to_string(),
        reason: reason.to_string(),
    };

    if !src.is_empty() && src.chars().all(|c| c.is_ascii_digit()) {
        return Err(open_err("capture devices are not supported"));
    }

    let path = Path::new(src);
    if path.is_dir() {
        let seq = ImageSequence::from_dir(path).map_err(|err| open_err(&err.to_string()))?;
        if seq.remaining() == 0 {
            return Err(open_err("directory contains no images"));
        }
        info!("Opened {} with {} frames", src, seq.remaining());
        return Ok(VideoSource::Images(seq));
    }

    if !path.is_file() {
        return Err(open_err("no such file or directory"));
    }

    match ImageFormat::from_path(path) {
        Ok(ImageFormat::Gif) => {
            info!("Opened animation {}", src);
            Ok(VideoSource::Animation(GifFrames::open(path)?))
        }
        Ok(_) => {
            info!("Opened still image {}", src);
            Ok(VideoSource::Images(ImageSequence::new([path.to_path_buf()])))
        }
        Err(_) => Err(open_err("unsupported format")),
    }
}

/// Writes numbered PNG frames into a directory.
#[derive(Debug)]
pub struct ImageSequenceSink {
    dir: PathBuf,
    next_index: u64,
}

impl ImageSequenceSink {
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| Error::OutputCreate {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
            next_index: 0,
        })
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("frame_{index:06}.png"))
    }
}

impl FrameSink for ImageSequenceSink {
    fn write(&mut self, frame: &Frame) -> Result<()> {
        let path = self.frame_path(self.next_index);
        frame.save_with_format(&path, ImageFormat::Png)?;
        self.next_index += 1;
        Ok(())
    }
}

/// Encodes frames into an animated GIF.
pub struct GifSink {
    encoder: Option<GifEncoder<BufWriter<File>>>,
    delay: Delay,
}

impl GifSink {
    pub fn create(path: &Path, fps: u32) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::OutputCreate {
            path: path.to_path_buf(),
            source,
        })?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder.set_repeat(Repeat::Infinite)?;
        Ok(Self {
            encoder: Some(encoder),
            delay: Delay::from_numer_denom_ms(1000, fps.max(1)),
        })
    }
}

impl FrameSink for GifSink {
    fn write(&mut self, frame: &Frame) -> Result<()> {
        let Some(encoder) = self.encoder.as_mut() else {
            return Ok(());
        };
        let rgba = DynamicImage::ImageRgb8(frame.clone()).to_rgba8();
        encoder.encode_frame(image::Frame::from_parts(rgba, 0, 0, self.delay))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        // The trailer is written when the encoder drops.
        if self.encoder.take().is_some() {
            debug!("Closed animation output");
        }
        Ok(())
    }
}

/// Any sink `create_sink` can produce.
pub enum VideoSink {
    Images(ImageSequenceSink),
    Animation(GifSink),
}

impl FrameSink for VideoSink {
    fn write(&mut self, frame: &Frame) -> Result<()> {
        match self {
            Self::Images(sink) => sink.write(frame),
            Self::Animation(sink) => sink.write(frame),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self {
            Self::Images(sink) => sink.finish(),
            Self::Animation(sink) => sink.finish(),
        }
    }
}

pub const DEFAULT_FPS: u32 = 30;

/// Create an output for annotated frames: an animated GIF when `path` ends
/// in `.gif`, otherwise a directory of PNG frames.
pub fn create_sink(path: &Path) -> Result<VideoSink> {
    let is_gif = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
    if is_gif {
        Ok(VideoSink::Animation(GifSink::create(path, DEFAULT_FPS)?))
    } else {
        Ok(VideoSink::Images(ImageSequenceSink::create(path)?))
    }
}

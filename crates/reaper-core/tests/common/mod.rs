#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::{Duration, Instant};

use image::{DynamicImage, Rgba, RgbaImage};

use reaper_core::edit::{EditDispatcher, LocalBackend, ProcessingBackend};
use reaper_core::error::{ReaperError, Result};
use reaper_core::format::FileFormat;
use reaper_core::geometry::CropRect;
use reaper_core::source::{EncodedImage, SourceImage};

/// Horizontal gradient with a solid red square in the top-left quarter.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbaImage::new(width, height);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = if x < width / 4 && y < height / 4 {
            Rgba([255, 0, 0, 255])
        } else {
            let v = (x * 255 / width.max(1)) as u8;
            Rgba([v, v, v, 255])
        };
    }
    DynamicImage::ImageRgba8(img)
}

pub fn encoded(width: u32, height: u32, format: FileFormat) -> EncodedImage {
    EncodedImage::encode(&gradient(width, height), format).unwrap()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encoded(width, height, FileFormat::Png).bytes().to_vec()
}

pub fn source(width: u32, height: u32, name: &str) -> SourceImage {
    SourceImage::from_bytes(png_bytes(width, height), Some(name.to_string())).unwrap()
}

pub fn local_dispatcher() -> EditDispatcher {
    EditDispatcher::spawn(Arc::new(LocalBackend::default()), "test", Arc::new(|| {})).unwrap()
}

/// Poll until `done` holds or a generous timeout passes.
pub fn poll_until(mut poll: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if poll() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    false
}

/// Backend whose calls block until released from the test, and which can be
/// told to fail the next call.
pub struct GatedBackend {
    inner: LocalBackend,
    calls: AtomicUsize,
    gate: Mutex<mpsc::Receiver<()>>,
    fail_next: Mutex<bool>,
}

pub struct Gate {
    tx: mpsc::Sender<()>,
}

impl Gate {
    pub fn release(&self) {
        let _ = self.tx.send(());
    }
}

impl GatedBackend {
    pub fn new() -> (Arc<Self>, Gate) {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::new(Self {
            inner: LocalBackend::default(),
            calls: AtomicUsize::new(0),
            gate: Mutex::new(rx),
            fail_next: Mutex::new(false),
        });
        (backend, Gate { tx })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.gate.lock().unwrap().recv();
        let mut fail = self.fail_next.lock().unwrap();
        if *fail {
            *fail = false;
            return Err(ReaperError::Operation("backend unavailable".into()));
        }
        Ok(())
    }
}

impl ProcessingBackend for GatedBackend {
    fn crop(&self, image: &EncodedImage, rect: CropRect) -> Result<EncodedImage> {
        self.enter()?;
        self.inner.crop(image, rect)
    }

    fn resize(&self, image: &EncodedImage, width: u32, height: u32) -> Result<EncodedImage> {
        self.enter()?;
        self.inner.resize(image, width, height)
    }

    fn convert(&self, image: &EncodedImage, target: FileFormat) -> Result<EncodedImage> {
        self.enter()?;
        self.inner.convert(image, target)
    }
}

/// Backend that panics on its first call and behaves normally afterwards.
#[derive(Default)]
pub struct PanickingBackend {
    inner: LocalBackend,
    calls: AtomicUsize,
}

impl PanickingBackend {
    fn enter(&self) {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("decoder blew up");
        }
    }
}

impl ProcessingBackend for PanickingBackend {
    fn crop(&self, image: &EncodedImage, rect: CropRect) -> Result<EncodedImage> {
        self.enter();
        self.inner.crop(image, rect)
    }

    fn resize(&self, image: &EncodedImage, width: u32, height: u32) -> Result<EncodedImage> {
        self.enter();
        self.inner.resize(image, width, height)
    }

    fn convert(&self, image: &EncodedImage, target: FileFormat) -> Result<EncodedImage> {
        self.enter();
        self.inner.convert(image, target)
    }
}

// Sprite sheet animator
//
// Cycles through an ordered list of frame rectangles cut from one sprite
// sheet. Frames advance when the internal interval timer fires; the timer
// only moves when the owner calls `update` with the elapsed frame time.

use super::Frame;
use crate::engine::assets::{AssetError, SpriteSheet};
use crate::engine::timer::IntervalTimer;
use image::RgbaImage;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Delay between frames until configured otherwise
pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// Callback receiving the frame index and the visible image
pub type FrameChangedCallback = Box<dyn FnMut(usize, &RgbaImage)>;

/// Plays a frame sequence from a sprite sheet
pub struct SpriteAnimator {
    /// Source image the frames are cut from
    sheet: SpriteSheet,
    /// Ordered frame rectangles
    frames: Vec<Frame>,
    /// Index of the visible frame, always < frames.len() when frames exist
    current_index: usize,
    /// Cropped image of the visible frame
    current_frame: Option<RgbaImage>,
    /// Delay used the next time playback starts
    frame_delay: Duration,
    /// Fires once per frame advance while playing
    timer: IntervalTimer,
    on_frame_changed: Option<FrameChangedCallback>,
}

impl SpriteAnimator {
    /// Create an animator for the sprite sheet at `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        Ok(Self::from_sheet(SpriteSheet::load(path)?))
    }

    /// Create an animator for an already decoded sprite sheet
    pub fn from_sheet(sheet: SpriteSheet) -> Self {
        Self {
            sheet,
            frames: Vec::new(),
            current_index: 0,
            current_frame: None,
            frame_delay: DEFAULT_FRAME_DELAY,
            timer: IntervalTimer::new(DEFAULT_FRAME_DELAY),
            on_frame_changed: None,
        }
    }

    /// Register the frame-changed listener, replacing any previous one
    pub fn set_on_frame_changed(&mut self, callback: FrameChangedCallback) {
        self.on_frame_changed = Some(callback);
    }

    /// Append a frame; the first frame becomes visible immediately
    pub fn add_frame(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.frames.push(Frame::new(x, y, width, height));

        if self.frames.len() == 1 {
            self.update_current_frame();
        }
    }

    /// Append several frames in order
    pub fn add_frames<I>(&mut self, frames: I)
    where
        I: IntoIterator<Item = Frame>,
    {
        for frame in frames {
            self.add_frame(frame.x, frame.y, frame.width, frame.height);
        }
    }

    /// Stop playback and drop every frame
    pub fn clear_frames(&mut self) {
        self.stop();
        self.frames.clear();
        self.current_index = 0;
        self.current_frame = None;
    }

    /// Start playback at the current frame delay
    pub fn play(&mut self) {
        if self.frames.is_empty() {
            return;
        }

        self.timer.start(self.frame_delay);
    }

    /// Stop playback, keeping the visible frame
    pub fn stop(&mut self) {
        self.timer.stop();
    }

    /// Jump back to the first frame without touching playback
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.update_current_frame();
    }

    /// Stop playback and swap in the sprite sheet at `path`
    ///
    /// On failure the previous sheet stays in place and playback stays stopped.
    pub fn change_spritesheet<P: AsRef<Path>>(&mut self, path: P) -> Result<(), AssetError> {
        self.stop();
        let sheet = SpriteSheet::load(path)?;
        self.set_spritesheet(sheet);
        Ok(())
    }

    /// Stop playback and swap in an already decoded sprite sheet
    pub fn set_spritesheet(&mut self, sheet: SpriteSheet) {
        self.stop();
        self.sheet = sheet;

        if !self.frames.is_empty() {
            self.update_current_frame();
        }
    }

    /// Feed elapsed time to the frame timer, advancing once per firing
    ///
    /// When more than a full cycle is due at once, whole cycles are skipped
    /// and only the landing frame is shown.
    pub fn update(&mut self, dt: Duration) {
        let fired = self.timer.advance(dt) as usize;
        let len = self.frames.len();
        if fired == 0 || len == 0 {
            return;
        }

        if fired <= len {
            for _ in 0..fired {
                self.tick();
            }
        } else {
            self.current_index = (self.current_index + fired % len) % len;
            self.update_current_frame();
        }
    }

    /// Advance to the next frame, wrapping at the end of the sequence
    pub fn tick(&mut self) {
        if self.frames.is_empty() {
            return;
        }

        self.current_index = (self.current_index + 1) % self.frames.len();
        self.update_current_frame();
    }

    /// Set the delay between frames
    ///
    /// A running timer keeps its interval; the new delay is used by the next `play`.
    pub fn set_frame_delay(&mut self, delay: Duration) {
        self.frame_delay = delay;
    }

    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// Get the interval of the running timer, if playing
    pub fn active_interval(&self) -> Option<Duration> {
        self.timer.is_armed().then(|| self.timer.interval())
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_armed()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Get the visible frame image, `None` while the sequence is empty
    pub fn current_frame(&self) -> Option<&RgbaImage> {
        self.current_frame.as_ref()
    }

    /// Get the UV rectangle of the visible frame within the sheet
    pub fn current_uvs(&self) -> Option<(glam::Vec2, glam::Vec2)> {
        self.frames
            .get(self.current_index)
            .map(|frame| frame.uvs(self.sheet.width(), self.sheet.height()))
    }

    pub fn spritesheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    /// Re-crop the visible frame and notify the listener
    fn update_current_frame(&mut self) {
        let Some(frame) = self.frames.get(self.current_index) else {
            return;
        };

        let image = self.sheet.crop(frame.x, frame.y, frame.width, frame.height);
        let index = self.current_index;
        let image = self.current_frame.insert(image);

        if let Some(callback) = self.on_frame_changed.as_mut() {
            callback(index, &*image);
        }
    }
}

impl fmt::Debug for SpriteAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpriteAnimator")
            .field("sheet", &self.sheet.label())
            .field("frames", &self.frames)
            .field("current_index", &self.current_index)
            .field("frame_delay", &self.frame_delay)
            .field("playing", &self.is_playing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 4 columns of 16x16 cells, the red channel encodes the column
    fn test_sheet() -> SpriteSheet {
        let image = RgbaImage::from_fn(64, 16, |x, _| Rgba([(x / 16) as u8, 0, 0, 255]));
        SpriteSheet::from_image("test", image)
    }

    fn three_frame_animator() -> SpriteAnimator {
        let mut animator = SpriteAnimator::from_sheet(test_sheet());
        animator.add_frames([
            Frame::new(0, 0, 16, 16),
            Frame::new(16, 0, 16, 16),
            Frame::new(32, 0, 16, 16),
        ]);
        animator
    }

    fn recorded(animator: &mut SpriteAnimator) -> Rc<RefCell<Vec<usize>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        animator.set_on_frame_changed(Box::new(move |index, _| sink.borrow_mut().push(index)));
        log
    }

    #[test]
    fn test_first_frame_visible_before_play() {
        let mut animator = SpriteAnimator::from_sheet(test_sheet());
        assert!(animator.current_frame().is_none());

        animator.add_frame(16, 0, 16, 16);
        assert!(!animator.is_playing());

        let frame = animator.current_frame().unwrap();
        assert_eq!(frame.dimensions(), (16, 16));
        assert_eq!(frame.get_pixel(0, 0)[0], 1);
    }

    #[test]
    fn test_later_frames_do_not_recompute() {
        let mut animator = SpriteAnimator::from_sheet(test_sheet());
        let log = recorded(&mut animator);

        animator.add_frames([Frame::new(0, 0, 16, 16), Frame::new(16, 0, 16, 16)]);
        assert_eq!(*log.borrow(), vec![0]);
        assert_eq!(animator.current_index(), 0);
    }

    #[test]
    fn test_tick_wraps() {
        let mut animator = three_frame_animator();
        for _ in 0..3 {
            animator.tick();
        }
        assert_eq!(animator.current_index(), 0);

        animator.tick();
        assert_eq!(animator.current_index(), 1);
        assert_eq!(animator.current_frame().unwrap().get_pixel(0, 0)[0], 1);
    }

    #[test]
    fn test_five_ticks_at_150ms() {
        let mut animator = three_frame_animator();
        animator.set_frame_delay(Duration::from_millis(150));
        animator.play();

        for _ in 0..5 {
            animator.update(Duration::from_millis(150));
        }
        assert_eq!(animator.current_index(), 2);
    }

    #[test]
    fn test_update_without_play_is_inert() {
        let mut animator = three_frame_animator();
        animator.update(Duration::from_secs(1));
        assert_eq!(animator.current_index(), 0);
    }

    #[test]
    fn test_tick_on_empty_is_noop() {
        let mut animator = SpriteAnimator::from_sheet(test_sheet());
        let log = recorded(&mut animator);

        animator.tick();
        assert_eq!(animator.current_index(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_clear_then_play_is_noop() {
        let mut animator = three_frame_animator();
        animator.play();
        animator.tick();

        animator.clear_frames();
        assert!(!animator.is_playing());
        assert_eq!(animator.current_index(), 0);
        assert!(animator.current_frame().is_none());

        let log = recorded(&mut animator);
        animator.play();
        animator.update(Duration::from_secs(1));
        assert!(!animator.is_playing());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_stop_keeps_visible_frame() {
        let mut animator = three_frame_animator();
        animator.play();
        animator.tick();
        animator.stop();

        assert!(!animator.is_playing());
        assert_eq!(animator.current_index(), 1);
        assert_eq!(animator.current_frame().unwrap().get_pixel(0, 0)[0], 1);
    }

    #[test]
    fn test_reset_keeps_play_state() {
        let mut animator = three_frame_animator();
        animator.play();
        animator.tick();
        animator.tick();

        let log = recorded(&mut animator);
        animator.reset();
        assert_eq!(animator.current_index(), 0);
        assert!(animator.is_playing());
        assert_eq!(*log.borrow(), vec![0]);
    }

    #[test]
    fn test_frame_delay_applies_on_next_play() {
        let mut animator = three_frame_animator();
        animator.set_frame_delay(Duration::from_millis(150));
        animator.play();

        animator.set_frame_delay(Duration::from_millis(50));
        assert_eq!(animator.active_interval(), Some(Duration::from_millis(150)));

        animator.update(Duration::from_millis(100));
        assert_eq!(animator.current_index(), 0);

        animator.stop();
        animator.play();
        assert_eq!(animator.active_interval(), Some(Duration::from_millis(50)));
        animator.update(Duration::from_millis(100));
        assert_eq!(animator.current_index(), 2);
    }

    #[test]
    fn test_set_spritesheet_keeps_index() {
        let mut animator = three_frame_animator();
        animator.play();
        animator.tick();

        let swapped = RgbaImage::from_fn(64, 16, |_, _| Rgba([0, 200, 0, 255]));
        animator.set_spritesheet(SpriteSheet::from_image("swapped", swapped));

        assert!(!animator.is_playing());
        assert_eq!(animator.current_index(), 1);
        assert_eq!(animator.spritesheet().label(), "swapped");
        assert_eq!(animator.current_frame().unwrap().get_pixel(0, 0)[1], 200);
    }

    #[test]
    fn test_change_spritesheet_failure_keeps_sheet() {
        let mut animator = three_frame_animator();
        animator.play();

        let result = animator.change_spritesheet("/nonexistent/luigi.png");
        assert!(result.is_err());
        assert!(!animator.is_playing());
        assert_eq!(animator.spritesheet().label(), "test");
    }

    #[test]
    fn test_change_spritesheet_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("luigi.png");
        RgbaImage::from_fn(64, 16, |_, _| Rgba([0, 200, 0, 255]))
            .save(&path)
            .unwrap();

        let mut animator = three_frame_animator();
        animator.play();
        animator.tick();
        let log = recorded(&mut animator);

        animator.change_spritesheet(&path).unwrap();
        assert!(!animator.is_playing());
        assert_eq!(animator.current_index(), 1);
        assert!(animator.spritesheet().label().ends_with("luigi.png"));
        assert_eq!(animator.current_frame().unwrap().get_pixel(0, 0)[1], 200);
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn test_large_step_skips_whole_cycles() {
        let mut animator = three_frame_animator();
        animator.set_frame_delay(Duration::from_millis(10));
        animator.play();
        let log = recorded(&mut animator);

        // 100 firings over 3 frames
        animator.update(Duration::from_secs(1));
        assert_eq!(animator.current_index(), 1);
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn test_tiny_frame_delay_does_not_stall() {
        let mut animator = three_frame_animator();
        animator.set_frame_delay(Duration::from_nanos(1));
        animator.play();
        let log = recorded(&mut animator);

        animator.update(Duration::from_secs(5));
        assert!(animator.current_index() < 3);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn test_new_with_missing_file() {
        assert!(SpriteAnimator::new("/nonexistent/mario.png").is_err());
    }

    #[test]
    fn test_current_uvs() {
        let mut animator = three_frame_animator();
        animator.tick();

        let (uv_min, uv_max) = animator.current_uvs().unwrap();
        assert_eq!(uv_min, glam::Vec2::new(0.25, 0.0));
        assert_eq!(uv_max, glam::Vec2::new(0.5, 1.0));
    }
}

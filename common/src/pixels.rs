//! 画素バッファの抽象化
//!
//! 抽出器はデコード済みのRGB画素にだけ依存する。
//! デコード（JPEG/PNG）は呼び出し側の責務。

/// 矩形のRGB画素バッファ
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// (x, y) の画素。範囲外は呼び出し側が渡さないこと
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];
}

/// メモリ上のRGB8バッファ（行優先）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    width: u32,
    height: u32,
    data: Vec<[u8; 3]>,
}

impl RgbBuffer {
    /// 単色で埋めたバッファ
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self {
            width,
            height,
            data: vec![color; width as usize * height as usize],
        }
    }

    /// 画素列から生成。長さが合わなければNone
    pub fn from_pixels(width: u32, height: u32, data: Vec<[u8; 3]>) -> Option<Self> {
        (data.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn put(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.data[idx] = color;
        }
    }

    /// 矩形 [x0, x1) × [y0, y1) を塗りつぶす（範囲外は切り捨て）
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: [u8; 3]) {
        for y in y0..y1.min(self.height) {
            for x in x0..x1.min(self.width) {
                self.put(x, y, color);
            }
        }
    }
}

impl PixelSource for RgbBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.data[y as usize * self.width as usize + x as usize]
    }
}

#[cfg(feature = "image")]
impl PixelSource for image::RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

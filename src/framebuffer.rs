use rayon::prelude::*;

/// 深度缓冲的清空值，对应远平面
pub const FAR_DEPTH: f32 = 1.0;

/// 颜色格式为 ARGB8888，可以直接交给 minifb
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        FrameBuffer {
            width,
            height,
            data: vec![0; width * height],
            depth: vec![FAR_DEPTH; width * height],
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.data.fill(color);
        self.depth.fill(FAR_DEPTH);
    }

    /// 窗口尺寸变化时重新分配
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.data = vec![0; width * height];
        self.depth = vec![FAR_DEPTH; width * height];
    }

    pub fn put_pixel(&mut self, x: usize, y: usize, color: u32, depth: f32) {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if depth < self.depth[idx] {
                self.data[idx] = color;
                self.depth[idx] = depth;
            }
        }
    }

    pub fn ssaa(&self, factor: usize) -> Self {
        if factor <= 1 {
            return self.clone();
        }
        let new_width = self.width / factor;
        let new_height = self.height / factor;
        let mut new_data = vec![0; new_width * new_height];
        let count = (factor * factor) as u32;

        // 每一行互不相关，按行并行
        new_data
            .par_chunks_mut(new_width.max(1))
            .enumerate()
            .for_each(|(y, row)| {
                for (x, out) in row.iter_mut().enumerate() {
                    let mut a = 0u32;
                    let mut r = 0u32;
                    let mut g = 0u32;
                    let mut b = 0u32;

                    // 采样高分辨率区域内的所有像素
                    for dy in 0..factor {
                        for dx in 0..factor {
                            let src_idx = (y * factor + dy) * self.width + x * factor + dx;
                            let color = self.data[src_idx];

                            a += (color >> 24) & 0xFF;
                            r += (color >> 16) & 0xFF;
                            g += (color >> 8) & 0xFF;
                            b += color & 0xFF;
                        }
                    }

                    *out = (a / count) << 24 | (r / count) << 16 | (g / count) << 8 | b / count;
                }
            });

        Self {
            width: new_width,
            height: new_height,
            data: new_data,
            depth: vec![FAR_DEPTH; new_width * new_height], // 深度缓冲可简化处理
        }
    }

    pub fn save_to_image(&self, filepath: &str) -> Result<(), image::ImageError> {
        use image::{ImageBuffer, Rgba};

        let img = ImageBuffer::from_fn(self.width as u32, self.height as u32, |x, y| {
            let color = self.data[y as usize * self.width + x as usize];
            let a = ((color >> 24) & 0xFF) as u8;
            let r = ((color >> 16) & 0xFF) as u8;
            let g = ((color >> 8) & 0xFF) as u8;
            let b = (color & 0xFF) as u8;
            Rgba([r, g, b, a])
        });

        img.save(filepath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_test_keeps_nearest() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear(0xFF000000);
        fb.put_pixel(1, 1, 0xFFFF0000, 0.5);
        fb.put_pixel(1, 1, 0xFF00FF00, 0.7);
        assert_eq!(fb.data[5], 0xFFFF0000);
        fb.put_pixel(1, 1, 0xFF0000FF, 0.2);
        assert_eq!(fb.data[5], 0xFF0000FF);
        // 越界直接忽略
        fb.put_pixel(9, 9, 0xFFFFFFFF, 0.0);
    }

    #[test]
    fn ssaa_averages_blocks() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.clear(0xFF000000);
        fb.data[0] = 0xFFFFFFFF;
        fb.data[1] = 0xFFFFFFFF;
        let small = fb.ssaa(2);
        assert_eq!((small.width, small.height), (2, 1));
        assert_eq!(small.data[0], 0xFF7F7F7F);
        assert_eq!(small.data[1], 0xFF000000);
    }

    #[test]
    fn resize_reallocates() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.resize(3, 5);
        assert_eq!(fb.data.len(), 15);
        assert_eq!(fb.depth.len(), 15);
    }
}

//! Histogram of oriented gradients over a luminance image.

use ndarray::{Array2, Array3};

/// Luminance weights applied to R, G and B.
const LUMA: [f64; 3] = [0.2125, 0.7154, 0.0721];

/// L2-Hys regularizer and clipping threshold.
const BLOCK_EPS: f64 = 1e-5;
const BLOCK_CLIP: f64 = 0.2;

/// Grid parameters of the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HogParams {
    pub orientations: usize,
    pub pixels_per_cell: usize,
    pub cells_per_block: usize,
}

impl HogParams {
    /// Number of whole cells along an axis of `pixels` pixels.
    pub fn cells(&self, pixels: usize) -> usize {
        pixels / self.pixels_per_cell
    }

    /// Number of overlapping blocks along an axis of `pixels` pixels.
    pub fn blocks(&self, pixels: usize) -> usize {
        (self.cells(pixels) + 1).saturating_sub(self.cells_per_block)
    }

    /// Descriptor length for an image of the given size.
    pub fn descriptor_len(&self, height: usize, width: usize) -> usize {
        self.blocks(height)
            * self.blocks(width)
            * self.cells_per_block
            * self.cells_per_block
            * self.orientations
    }
}

/// Collapse an RGB image shaped `(H, W, 3)` to luminance.
pub fn luminance(rgb: &Array3<f64>) -> Array2<f64> {
    let (h, w, _) = rgb.dim();
    Array2::from_shape_fn((h, w), |(y, x)| {
        LUMA[0] * rgb[[y, x, 0]] + LUMA[1] * rgb[[y, x, 1]] + LUMA[2] * rgb[[y, x, 2]]
    })
}

/// Compute the block-normalized descriptor of a luminance image.
///
/// Gradients are central differences with zeroed borders; orientations are
/// unsigned and hard-assigned to equal-width bins over [0, 180) degrees.
/// Cell histograms hold the mean magnitude per pixel and are accumulated in
/// single precision, which is what the classifiers were fit on.
pub fn descriptor(gray: &Array2<f64>, params: &HogParams) -> Vec<f64> {
    let (magnitude, orientation) = gradients(gray);
    let cells = cell_histograms(&magnitude, &orientation, params);
    normalize_blocks(&cells, params)
}

fn gradients(gray: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
    let (h, w) = gray.dim();
    let mut magnitude = Array2::<f64>::zeros((h, w));
    let mut orientation = Array2::<f64>::zeros((h, w));

    for y in 0..h {
        for x in 0..w {
            let g_row = if y == 0 || y + 1 == h {
                0.0
            } else {
                gray[[y + 1, x]] - gray[[y - 1, x]]
            };
            let g_col = if x == 0 || x + 1 == w {
                0.0
            } else {
                gray[[y, x + 1]] - gray[[y, x - 1]]
            };
            magnitude[[y, x]] = g_col.hypot(g_row);
            orientation[[y, x]] = g_row.atan2(g_col).to_degrees().rem_euclid(180.0);
        }
    }

    (magnitude, orientation)
}

fn cell_histograms(
    magnitude: &Array2<f64>,
    orientation: &Array2<f64>,
    params: &HogParams,
) -> Array3<f64> {
    let (h, w) = magnitude.dim();
    let cell = params.pixels_per_cell;
    let (cells_row, cells_col) = (params.cells(h), params.cells(w));
    let bin_width = 180.0 / params.orientations as f32;
    let area = (cell * cell) as f32;

    let mut hist = Array3::zeros((cells_row, cells_col, params.orientations));
    for cr in 0..cells_row {
        for cc in 0..cells_col {
            for bin in 0..params.orientations {
                let lower = f64::from(bin_width * bin as f32);
                let upper = f64::from(bin_width * (bin + 1) as f32);
                let mut total = 0.0f32;
                for y in cr * cell..(cr + 1) * cell {
                    for x in cc * cell..(cc + 1) * cell {
                        let o = orientation[[y, x]];
                        if o >= lower && o < upper {
                            total += magnitude[[y, x]] as f32;
                        }
                    }
                }
                hist[[cr, cc, bin]] = f64::from(total / area);
            }
        }
    }
    hist
}

fn normalize_blocks(cells: &Array3<f64>, params: &HogParams) -> Vec<f64> {
    let (cells_row, cells_col, orientations) = cells.dim();
    let b = params.cells_per_block;
    let blocks_row = (cells_row + 1).saturating_sub(b);
    let blocks_col = (cells_col + 1).saturating_sub(b);

    let mut out = Vec::with_capacity(blocks_row * blocks_col * b * b * orientations);
    let mut block = Vec::with_capacity(b * b * orientations);
    for br in 0..blocks_row {
        for bc in 0..blocks_col {
            block.clear();
            for r in br..br + b {
                for c in bc..bc + b {
                    for o in 0..orientations {
                        block.push(cells[[r, c, o]]);
                    }
                }
            }
            l2_hys(&mut block);
            out.extend_from_slice(&block);
        }
    }
    out
}

fn l2_hys(block: &mut [f64]) {
    let eps_sq = BLOCK_EPS * BLOCK_EPS;
    let norm = (block.iter().map(|v| v * v).sum::<f64>() + eps_sq).sqrt();
    for v in block.iter_mut() {
        *v = (*v / norm).min(BLOCK_CLIP);
    }
    let norm = (block.iter().map(|v| v * v).sum::<f64>() + eps_sq).sqrt();
    for v in block.iter_mut() {
        *v /= norm;
    }
}

use super::schedule::{FRACTION_BITS, GeometryError, SamplingSchedule};
use super::surface::{PixelBuffer, Surface};

/// Number of cells processed per step on the lane path.
pub const LANES: usize = 8;

/// How [`Presenter::present`] walks the pixels. Both strategies write
/// identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Reference path: per-pixel fixed-point accumulators.
    Scalar,
    /// Stages a 180-degree flipped copy of the source, then gathers each
    /// output row through the column table `LANES` cells at a time.
    #[default]
    Lanes,
}

impl Strategy {
    /// The fastest strategy available to this build.
    pub fn detect() -> Self {
        Strategy::Lanes
    }
}

/// Scales and rotates a fixed-size source frame onto a destination surface.
pub struct Presenter {
    schedule: SamplingSchedule,
    strategy: Strategy,
    /// Source turned 180 degrees, sized exactly like the source.
    scratch: Vec<u32>,
    /// Column table re-expressed against `scratch` (ascending).
    flipped_columns: Vec<u32>,
}

impl Presenter {
    pub fn new(
        source_size: (u32, u32),
        dest_size: (u32, u32),
        strategy: Strategy,
    ) -> Result<Self, GeometryError> {
        let schedule =
            SamplingSchedule::new(source_size.0, source_size.1, dest_size.0, dest_size.1)?;
        let mut presenter = Self {
            schedule,
            strategy,
            scratch: Vec::new(),
            flipped_columns: Vec::new(),
        };
        presenter.prepare_lanes();
        Ok(presenter)
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn schedule(&self) -> &SamplingSchedule {
        &self.schedule
    }

    /// Rebuild the schedule for a new destination extent. A no-op when the
    /// extent is unchanged.
    pub fn resize(&mut self, dest_size: (u32, u32)) -> Result<(), GeometryError> {
        if self.schedule.dest_size() == dest_size {
            return Ok(());
        }
        let (src_w, src_h) = self.schedule.source_size();
        self.schedule = SamplingSchedule::new(src_w, src_h, dest_size.0, dest_size.1)?;
        self.prepare_lanes();
        Ok(())
    }

    /// Overwrite every addressed cell of `surface` with the rotated, scaled
    /// `source`.
    ///
    /// The extents of `source` and `surface` must match the schedule; a
    /// mismatch is a wiring bug and panics.
    pub fn present(&mut self, source: &PixelBuffer<'_>, surface: &mut Surface<'_>) {
        assert_eq!(
            (source.width(), source.height()),
            self.schedule.source_size(),
            "source extent does not match the presenter schedule"
        );
        assert_eq!(
            (surface.width(), surface.height()),
            self.schedule.dest_size(),
            "surface extent does not match the presenter schedule"
        );

        match self.strategy {
            Strategy::Scalar => present_scalar(&self.schedule, source, surface),
            Strategy::Lanes => self.present_lanes(source, surface),
        }
    }

    fn prepare_lanes(&mut self) {
        if self.strategy != Strategy::Lanes {
            self.scratch = Vec::new();
            self.flipped_columns = Vec::new();
            return;
        }
        let (src_w, src_h) = self.schedule.source_size();
        self.scratch = vec![0; src_w as usize * src_h as usize];
        self.flipped_columns = self
            .schedule
            .column_lut()
            .iter()
            .map(|&col| src_w - 1 - col)
            .collect();
    }

    fn present_lanes(&mut self, source: &PixelBuffer<'_>, surface: &mut Surface<'_>) {
        let (src_w, src_h) = self.schedule.source_size();
        let w = src_w as usize;

        // Stage: scratch row r is source row (h-1-r) reversed.
        for (r, out) in self.scratch.chunks_exact_mut(w).enumerate() {
            let src_row = source.row(src_h - 1 - r as u32);
            reverse_into(src_row, out);
        }

        for (y, &src_row) in self.schedule.row_lut().iter().enumerate() {
            let flipped = (src_h - 1 - src_row) as usize;
            let line = &self.scratch[flipped * w..(flipped + 1) * w];
            gather(line, &self.flipped_columns, surface.row_mut(y as u32));
        }
    }
}

/// The reference blit: a literal walk of both accumulators downward.
pub fn present_scalar(
    schedule: &SamplingSchedule,
    source: &PixelBuffer<'_>,
    surface: &mut Surface<'_>,
) {
    let (dst_w, dst_h) = schedule.dest_size();
    let x_step = schedule.x_step();
    let y_step = schedule.y_step();

    let mut src_y_fixed = schedule.y_start();
    for dst_y in 0..dst_h {
        let src_line = source.row(src_y_fixed >> FRACTION_BITS);
        let dst_line = surface.row_mut(dst_y);

        let mut src_x_fixed = schedule.x_start();
        for cell in dst_line.iter_mut().take(dst_w as usize) {
            *cell = src_line[(src_x_fixed >> FRACTION_BITS) as usize];
            src_x_fixed = src_x_fixed.wrapping_sub(x_step);
        }
        src_y_fixed = src_y_fixed.wrapping_sub(y_step);
    }
}

/// Copy `src` into `dst` back to front, `LANES` cells per step.
fn reverse_into(src: &[u32], dst: &mut [u32]) {
    debug_assert_eq!(src.len(), dst.len());
    let n = src.len();
    let whole = n / LANES * LANES;

    // dst[i] = src[n-1-i]; the first `whole` cells of dst come from the
    // last `whole` cells of src.
    let tail = &src[n - whole..];
    for (out, chunk) in dst[..whole]
        .chunks_exact_mut(LANES)
        .zip(tail.rchunks_exact(LANES))
    {
        let mut lanes = [0u32; LANES];
        lanes.copy_from_slice(chunk);
        lanes.reverse();
        out.copy_from_slice(&lanes);
    }
    for (i, cell) in dst[whole..].iter_mut().enumerate() {
        *cell = src[n - whole - 1 - i];
    }
}

/// `dst[i] = line[columns[i]]`, `LANES` cells per step with a scalar tail.
fn gather(line: &[u32], columns: &[u32], dst: &mut [u32]) {
    let mut out = dst.chunks_exact_mut(LANES);
    let mut idx = columns.chunks_exact(LANES);
    for (chunk, cols) in (&mut out).zip(&mut idx) {
        let mut lanes = [0u32; LANES];
        for (lane, &col) in lanes.iter_mut().zip(cols) {
            *lane = line[col as usize];
        }
        chunk.copy_from_slice(&lanes);
    }
    for (cell, &col) in out.into_remainder().iter_mut().zip(idx.remainder()) {
        *cell = line[col as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_into_handles_remainder() {
        for n in [1usize, 7, 8, 9, 16, 21] {
            let src: Vec<u32> = (0..n as u32).collect();
            let mut dst = vec![0; n];
            reverse_into(&src, &mut dst);
            let expected: Vec<u32> = src.iter().rev().copied().collect();
            assert_eq!(dst, expected, "n = {n}");
        }
    }

    #[test]
    fn gather_handles_remainder() {
        let line: Vec<u32> = (100..120).collect();
        let columns: Vec<u32> = (0..11).map(|i| (i * 3) % 20).collect();
        let mut dst = vec![0; 11];
        gather(&line, &columns, &mut dst);
        for (i, &c) in columns.iter().enumerate() {
            assert_eq!(dst[i], 100 + c);
        }
    }

    #[test]
    fn scalar_presenter_drops_scratch() {
        let p = Presenter::new((4, 4), (8, 8), Strategy::Scalar).unwrap();
        assert!(p.scratch.is_empty());
    }

    #[test]
    fn resize_rebuilds_tables() {
        let mut p = Presenter::new((4, 2), (4, 2), Strategy::Lanes).unwrap();
        p.resize((8, 2)).unwrap();
        assert_eq!(p.schedule().dest_size(), (8, 2));
        assert_eq!(p.flipped_columns, vec![0, 0, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    #[should_panic(expected = "surface extent")]
    fn mismatched_surface_panics() {
        let src = [0u32; 4];
        let mut dst = [0u32; 9];
        let mut p = Presenter::new((2, 2), (2, 2), Strategy::Scalar).unwrap();
        let source = PixelBuffer::new(&src, 2, 2).unwrap();
        let mut surface = Surface::packed(&mut dst, 3, 3).unwrap();
        p.present(&source, &mut surface);
    }
}

//! Flex: Where leftover space goes once constraints are resolved.

/// The axis along which a layout splits its area.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub enum Direction {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    #[default]
    Vertical,
}

/// Distribution of free space among the regions of a split.
///
/// Free space is what remains after every constraint has been resolved and
/// any `Fill`/`Min` growth has been applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub enum Flex {
    /// The last constraint of the lowest priority class absorbs all free space.
    ///
    /// Matches layouts written before flex modes existed.
    Legacy,
    /// Regions packed at the start; free space after the last region.
    #[default]
    Start,
    /// Regions packed at the end; free space before the first region.
    End,
    /// Free space split evenly between both ends.
    Center,
    /// Free space split evenly between adjacent regions, none at the edges.
    SpaceBetween,
    /// Half-size gaps at the edges, full-size gaps between regions.
    SpaceAround,
    /// Equal gaps everywhere, edges included.
    SpaceEvenly,
}

impl Flex {
    /// Relative gap weights for the `count + 1` gaps of a split: before the
    /// first region, between each adjacent pair, and after the last region.
    pub(crate) fn gap_weights(self, count: usize) -> Vec<u32> {
        let mut weights = vec![0; count + 1];
        if count == 0 {
            return weights;
        }
        match self {
            Self::Legacy | Self::Start => weights[count] = 1,
            Self::End => weights[0] = 1,
            Self::Center => {
                weights[0] = 1;
                weights[count] = 1;
            }
            Self::SpaceBetween => {
                if count == 1 {
                    weights[1] = 1;
                } else {
                    weights[1..count].fill(1);
                }
            }
            Self::SpaceAround => {
                weights[1..count].fill(2);
                weights[0] = 1;
                weights[count] = 1;
            }
            Self::SpaceEvenly => weights.fill(1),
        }
        weights
    }
}

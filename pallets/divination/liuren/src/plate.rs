//! # 天地盘
//!
//! - 地盘：十二地支固定排列，子居第 1 位
//! - 天盘：以月将为起点顺排十二地支，月将居第 1 位
//!
//! 两盘满足 `tian_pan[k] == di_pan[(k + rotation) % 12]`，其中 rotation 为月将的地支序号。

use crate::types::DiZhi;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// 地盘（固定）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub struct DiPan {
    pub positions: [DiZhi; 12],
}

impl Default for DiPan {
    fn default() -> Self {
        Self { positions: DiZhi::ALL }
    }
}

impl DiPan {
    /// 第 position 位（从 1 起算）的地支
    pub fn at(&self, position: usize) -> Option<DiZhi> {
        self.positions.get(position.checked_sub(1)?).copied()
    }
}

/// 天盘（随月将旋转）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
pub struct TianPan {
    pub positions: [DiZhi; 12],
    /// 相对地盘的旋转量（月将序号）
    pub rotation: u8,
}

impl TianPan {
    /// 以月将起天盘
    pub fn new(yue_jiang: DiZhi) -> Self {
        let mut positions = DiZhi::ALL;
        positions.rotate_left(yue_jiang.index() as usize);
        Self { positions, rotation: yue_jiang.index() }
    }

    /// 第 position 位（从 1 起算）的地支
    pub fn at(&self, position: usize) -> Option<DiZhi> {
        self.positions.get(position.checked_sub(1)?).copied()
    }

    /// 地支在天盘中的位次（从 1 起算）
    pub fn position_of(&self, zhi: DiZhi) -> usize {
        (zhi.index() as usize + 12 - self.rotation as usize) % 12 + 1
    }
}

/// 构建天地盘
pub fn calculate_tian_di_pan(yue_jiang: DiZhi) -> (TianPan, DiPan) {
    (TianPan::new(yue_jiang), DiPan::default())
}

#[cfg(feature = "std")]
fn serialize_positions<S: serde::Serializer>(positions: &[DiZhi; 12], serializer: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(12))?;
    for (i, zhi) in positions.iter().enumerate() {
        map.serialize_entry(&alloc::format!("第{}位", i + 1), zhi)?;
    }
    map.end()
}

#[cfg(feature = "std")]
impl serde::Serialize for TianPan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_positions(&self.positions, serializer)
    }
}

#[cfg(feature = "std")]
impl serde::Serialize for DiPan {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_positions(&self.positions, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_di_pan_is_canonical() {
        let di_pan = DiPan::default();
        assert_eq!(di_pan.at(1), Some(DiZhi::Zi));
        assert_eq!(di_pan.at(12), Some(DiZhi::Hai));
        assert_eq!(di_pan.at(0), None);
        assert_eq!(di_pan.at(13), None);
    }

    #[test]
    fn test_tian_pan_starts_at_yue_jiang() {
        let tian_pan = TianPan::new(DiZhi::Wu);
        assert_eq!(tian_pan.at(1), Some(DiZhi::Wu));
        assert_eq!(tian_pan.at(2), Some(DiZhi::Wei));
        assert_eq!(tian_pan.at(7), Some(DiZhi::Zi));
        assert_eq!(tian_pan.at(12), Some(DiZhi::Si));
        assert_eq!(tian_pan.position_of(DiZhi::Wu), 1);
        assert_eq!(tian_pan.position_of(DiZhi::Si), 12);
    }

    #[test]
    fn test_rotation_property_for_every_yue_jiang() {
        for yue_jiang in DiZhi::ALL {
            let (tian_pan, di_pan) = calculate_tian_di_pan(yue_jiang);
            assert_eq!(tian_pan.rotation, yue_jiang.index());
            for k in 0..12usize {
                let rotated = (k + tian_pan.rotation as usize) % 12;
                assert_eq!(tian_pan.positions[k], di_pan.positions[rotated]);
            }
        }
    }
}

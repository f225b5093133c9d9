use crate::frame::JointIndex;
use thiserror::Error;

/// フレーム単位の生成エラー
///
/// 呼び出し側がそのフレームを捨てて次に進めば回復できる。
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// テーブルが参照する関節がフレームに存在しない
    #[error("joint {0:?} is missing from the captured frame")]
    MissingJoint(JointIndex),
}

/// ボーンテーブル構築時の検証エラー
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// from関節が先行エントリで解決されていない（順序違反）
    #[error("bone '{bone}': parent joint {joint:?} is not resolved by any earlier entry")]
    UnresolvedParent {
        bone: &'static str,
        joint: JointIndex,
    },
    #[error("joint {0:?} is targeted by more than one bone")]
    DuplicateTarget(JointIndex),
    #[error("bone '{0}' has a non-positive length")]
    NonPositiveLength(&'static str),
    #[error("excluded name '{0}' does not match any bone in the table")]
    UnknownExclusion(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_joint_display() {
        let err = GenerateError::MissingJoint(JointIndex::HandLeft);
        assert_eq!(
            err.to_string(),
            "joint HandLeft is missing from the captured frame"
        );
    }
}

//! ボーントポロジーテーブル
//!
//! キャプチャ関節ペア → ターゲットキャラクタのボーンの静的対応表。
//! テーブルはトポロジカル順（各エントリのfrom関節は、ルートか
//! それより前のエントリのto関節）で並んでいる。順序の不変条件は
//! `validate_table` で構築時に検証できる。

use crate::errors::TopologyError;
use crate::frame::JointIndex;

/// ルート関節（全身移動の基準）
pub const ROOT: JointIndex = JointIndex::HipCenter;

/// ターゲットキャラクタのルート基準高さ（キャラクタ単位）
pub const ROOT_HEIGHT: f32 = 0.98;

/// 1フレームあたりのルート移動量（固定ステップ）
/// キャプチャの実移動距離は使わず、移動方向のみを固定量で反映する。
/// ノイズの多い入力で大振りな移動が出るのを避けるための単純化。
pub const STEP_LENGTH: f32 = 0.15;

/// ボーン定義: ターゲットボーン名 + キャプチャ関節ペア + 正準長
#[derive(Debug, Clone, Copy)]
pub struct BoneDef {
    pub bone: &'static str,
    pub from: JointIndex,
    pub to: JointIndex,
    /// キャラクタ単位の固定長（キャプチャ側の体型に依存しない）
    pub length: f32,
}

const fn bone(bone: &'static str, from: JointIndex, to: JointIndex, length: f32) -> BoneDef {
    BoneDef {
        bone,
        from,
        to,
        length,
    }
}

/// 全ボーン定義（トポロジカル順）
///
/// ルート以外の各関節はちょうど1回だけtoに現れる（単一ルートの木）。
pub static BONE_TABLE: &[BoneDef] = &[
    // 体幹
    bone("spine", JointIndex::HipCenter, JointIndex::Spine, 0.24),
    bone("chest", JointIndex::Spine, JointIndex::ShoulderCenter, 0.26),
    bone("neck", JointIndex::ShoulderCenter, JointIndex::Head, 0.20),
    // 左腕
    bone("leftShoulder", JointIndex::ShoulderCenter, JointIndex::ShoulderLeft, 0.16),
    bone("leftUpperArm", JointIndex::ShoulderLeft, JointIndex::ElbowLeft, 0.28),
    bone("leftForeArm", JointIndex::ElbowLeft, JointIndex::WristLeft, 0.24),
    bone("leftHand", JointIndex::WristLeft, JointIndex::HandLeft, 0.10),
    // 右腕
    bone("rightShoulder", JointIndex::ShoulderCenter, JointIndex::ShoulderRight, 0.16),
    bone("rightUpperArm", JointIndex::ShoulderRight, JointIndex::ElbowRight, 0.28),
    bone("rightForeArm", JointIndex::ElbowRight, JointIndex::WristRight, 0.24),
    bone("rightHand", JointIndex::WristRight, JointIndex::HandRight, 0.10),
    // 左脚
    bone("leftHip", JointIndex::HipCenter, JointIndex::HipLeft, 0.12),
    bone("leftThigh", JointIndex::HipLeft, JointIndex::KneeLeft, 0.40),
    bone("leftShin", JointIndex::KneeLeft, JointIndex::AnkleLeft, 0.38),
    bone("leftFoot", JointIndex::AnkleLeft, JointIndex::FootLeft, 0.14),
    // 右脚
    bone("rightHip", JointIndex::HipCenter, JointIndex::HipRight, 0.12),
    bone("rightThigh", JointIndex::HipRight, JointIndex::KneeRight, 0.40),
    bone("rightShin", JointIndex::KneeRight, JointIndex::AnkleRight, 0.38),
    bone("rightFoot", JointIndex::AnkleRight, JointIndex::FootRight, 0.14),
];

/// 向きコマンドを発行しないボーン名（完全一致）
///
/// 鎖骨・骨盤リンクと首は位置の蓄積にだけ使い、pointAtは出さない。
pub static ORIENTATION_EXCLUDED: &[&str] = &[
    "neck",
    "leftShoulder",
    "rightShoulder",
    "leftHip",
    "rightHip",
];

/// このボーンにpointAt/rollを発行するか
pub fn emits_orientation(bone: &str) -> bool {
    !ORIENTATION_EXCLUDED.contains(&bone)
}

/// テーブルの不変条件を検証する
///
/// - 各エントリのfrom関節が解決済み（ルートか、前のエントリのto）
/// - 各関節が複数のエントリのtoにならない
/// - 長さが正
/// - 除外リストの名前が実在するボーン名
pub fn validate_table() -> Result<(), TopologyError> {
    let mut resolved = [false; JointIndex::COUNT];
    resolved[ROOT as usize] = true;

    for def in BONE_TABLE {
        if !resolved[def.from as usize] {
            return Err(TopologyError::UnresolvedParent {
                bone: def.bone,
                joint: def.from,
            });
        }
        if resolved[def.to as usize] {
            return Err(TopologyError::DuplicateTarget(def.to));
        }
        if def.length <= 0.0 {
            return Err(TopologyError::NonPositiveLength(def.bone));
        }
        resolved[def.to as usize] = true;
    }

    for name in ORIENTATION_EXCLUDED {
        if !BONE_TABLE.iter().any(|def| def.bone == *name) {
            return Err(TopologyError::UnknownExclusion(name));
        }
    }

    Ok(())
}

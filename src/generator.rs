//! キネマティック・アキュムレータ
//!
//! キャプチャ1フレームから、ボーン長で正規化した最終関節位置を
//! テーブル順に積み上げる。各ボーンの最終位置は、親関節の計算済み
//! 最終位置 + 生の方向ベクトルを単位化して正準長を掛けたオフセット。
//! ルートの全身移動はセッション最初のフレームを基準に方向だけを取り、
//! 固定ステップ量を掛けて返す。

use nalgebra::Vector3;

use crate::errors::GenerateError;
use crate::frame::{Frame, JointIndex};
use crate::rig::{self, BONE_TABLE, ROOT, ROOT_HEIGHT, STEP_LENGTH};

/// 単位ベクトル化（厳密なゼロベクトルはゼロのまま返す）
///
/// 関節が完全に重なったフレームでもエラーにせず、長さ0のオフセット
/// として伝播させる。
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let norm = v.norm();
    if norm == 0.0 {
        Vector3::zeros()
    } else {
        v / norm
    }
}

/// 1ボーン分の計算結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneSample {
    pub bone: &'static str,
    /// ボーン長補正済みの最終位置（ルート基準のキャラクタ座標）
    pub position: Vector3<f32>,
    /// 正規化前の方向ベクトルの奥行き成分が正（=ボーンが後ろ向き）。
    /// このとき親ボーンを180°ロールしないと関節が裏返って見える。
    pub flipped: bool,
}

/// スクリプト生成の作業状態
///
/// 最終位置集合と基準ルート位置は1インスタンス・1セッション所有。
/// 並行呼び出しは想定しない（同時に1フレームずつ処理する契約）。
pub struct ScriptGenerator {
    finals: [Vector3<f32>; JointIndex::COUNT],
    /// セッション最初のフレームのルート位置（init直後はNone）
    reference_root: Option<Vector3<f32>>,
}

impl ScriptGenerator {
    pub fn new() -> Self {
        let mut generator = Self {
            finals: [Vector3::zeros(); JointIndex::COUNT],
            reference_root: None,
        };
        generator.reset_finals();
        generator
    }

    /// 新しい記録セッションを開始する
    ///
    /// 基準ルートをクリアし、最終位置集合を初期値（ルートは正準高さ、
    /// 他はゼロ）に戻す。前セッションの値を持ち越さない。
    pub fn init(&mut self) {
        self.reference_root = None;
        self.reset_finals();
    }

    fn reset_finals(&mut self) {
        self.finals = [Vector3::zeros(); JointIndex::COUNT];
        self.finals[ROOT as usize] = Vector3::new(0.0, ROOT_HEIGHT, 0.0);
    }

    /// 関節の現在の最終位置
    pub fn final_position(&self, joint: JointIndex) -> Vector3<f32> {
        self.finals[joint as usize]
    }

    /// ルートの全身移動量を計算する
    ///
    /// init後最初のフレームでは現在位置を基準として記録しゼロを返す。
    /// 以降は (現在 - 基準) を単位化して固定ステップ量を掛けた
    /// ベクトルを返す。基準と一致する場合はゼロベクトル。
    pub fn root_displacement(&mut self, frame: &Frame) -> Result<Vector3<f32>, GenerateError> {
        let current = frame
            .get(ROOT)
            .ok_or(GenerateError::MissingJoint(ROOT))?;

        match self.reference_root {
            None => {
                self.reference_root = Some(current);
                Ok(Vector3::zeros())
            }
            Some(reference) => Ok(normalize_or_zero(current - reference) * STEP_LENGTH),
        }
    }

    /// 全ボーンの最終位置をテーブル順に計算する
    ///
    /// 戻り値は向きコマンド対象ボーンのみ（テーブル順）。最終位置集合は
    /// テーブルに現れる全関節について更新される。必要な関節が欠けている
    /// 場合は何も更新せずにエラーを返す。
    pub fn joint_positions(&mut self, frame: &Frame) -> Result<Vec<BoneSample>, GenerateError> {
        // 先に全関節を解決してから書き込む（途中失敗による半端な更新を防ぐ）
        let mut raw = Vec::with_capacity(BONE_TABLE.len());
        for def in BONE_TABLE {
            let from = frame
                .get(def.from)
                .ok_or(GenerateError::MissingJoint(def.from))?;
            let to = frame
                .get(def.to)
                .ok_or(GenerateError::MissingJoint(def.to))?;
            raw.push((from, to));
        }

        let mut samples = Vec::with_capacity(BONE_TABLE.len());
        for (def, (raw_from, raw_to)) in BONE_TABLE.iter().zip(raw) {
            let direction = raw_to - raw_from;
            let offset = normalize_or_zero(direction) * def.length;
            // fromの最終位置はテーブル順により解決済み
            let position = self.finals[def.from as usize] + offset;
            self.finals[def.to as usize] = position;

            if rig::emits_orientation(def.bone) {
                samples.push(BoneSample {
                    bone: def.bone,
                    position,
                    flipped: direction.z > 0.0,
                });
            }
        }
        Ok(samples)
    }
}

impl Default for ScriptGenerator {
    fn default() -> Self {
        Self::new()
    }
}

//! アニメーションランタイム向けスクリプト出力
//!
//! 計算済みのルート移動量と関節最終位置を、ターゲットランタイムの
//! テキストコマンド（全てduration=0の即時文）に変換する。文面の
//! テンプレートはこのモジュールが唯一の正とし、テストで固定する。

use crate::config::ScriptConfig;
use crate::errors::GenerateError;
use crate::frame::Frame;
use crate::generator::{BoneSample, ScriptGenerator};
use nalgebra::Vector3;

/// スクリプト生成器（ジェネレータ + 出力テンプレート）
pub struct ScriptEmitter {
    character: String,
    anchor: String,
    marker: String,
    generator: ScriptGenerator,
}

impl ScriptEmitter {
    pub fn new(config: &ScriptConfig) -> Self {
        Self {
            character: config.character.clone(),
            anchor: config.anchor.clone(),
            marker: config.marker.clone(),
            generator: ScriptGenerator::new(),
        }
    }

    /// 記録セッションを開始する（ジェネレータ状態をリセット）
    pub fn init(&mut self) {
        self.generator.init();
    }

    pub fn generator(&self) -> &ScriptGenerator {
        &self.generator
    }

    /// 全身移動コマンド（2文）
    ///
    /// アンカーをルート移動量の垂直成分だけ動かし、キャラクタ本体を
    /// アンカーへ移動させる。
    pub fn movement_code(&mut self, frame: &Frame) -> Result<String, GenerateError> {
        let displacement = self.generator.root_displacement(frame)?;
        Ok(self.format_movement(displacement))
    }

    fn format_movement(&self, displacement: Vector3<f32>) -> String {
        let mut code = String::new();
        code.push_str(&format!(
            "{}.move(UP, {}, duration=0);\n",
            self.anchor, displacement.y
        ));
        code.push_str(&format!(
            "{}.moveTo({}, duration=0);\n",
            self.character, self.anchor
        ));
        code
    }

    /// 関節向きコマンド
    ///
    /// 向き対象の各ボーンについて、マーカーを最終位置に置いてから
    /// 親リムをマーカーへ向ける。向き補正フラグが立っている場合は
    /// 180°（0.5回転）のロールを追加する。
    pub fn joints_code(&mut self, frame: &Frame) -> Result<String, GenerateError> {
        let samples = self.generator.joint_positions(frame)?;
        Ok(self.format_joints(&samples))
    }

    fn format_joints(&self, samples: &[BoneSample]) -> String {
        let mut code = String::new();
        for sample in samples {
            code.push_str(&format!(
                "{}.setPosition({}, {}, {}, duration=0);\n",
                self.marker, sample.position.x, sample.position.y, sample.position.z
            ));
            code.push_str(&format!(
                "{}.{}.pointAt({}, duration=0);\n",
                self.character, sample.bone, self.marker
            ));
            if sample.flipped {
                code.push_str(&format!(
                    "{}.{}.roll(LEFT, 0.5, duration=0);\n",
                    self.character, sample.bone
                ));
            }
        }
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::JointIndex;
    use crate::rig::{self, BONE_TABLE, ROOT, STEP_LENGTH};

    fn emitter() -> ScriptEmitter {
        ScriptEmitter::new(&ScriptConfig::default())
    }

    fn full_frame(depth: f32) -> Frame {
        // 全関節を少しずつずらして配置（方向が縮退しないように）
        let mut frame = Frame::new();
        for i in 0..JointIndex::COUNT {
            let joint = JointIndex::from_index(i).unwrap();
            frame.set(
                joint,
                Vector3::new(i as f32 * 0.1, 1.0 + i as f32 * 0.05, depth),
            );
        }
        frame
    }

    #[test]
    fn test_movement_code_first_frame() {
        let mut emitter = emitter();
        let mut frame = Frame::new();
        frame.set(ROOT, Vector3::new(5.0, 3.0, 1.0));

        let code = emitter.movement_code(&frame).unwrap();
        assert_eq!(
            code,
            "moveAnchor.move(UP, 0, duration=0);\ncharacter.moveTo(moveAnchor, duration=0);\n"
        );
    }

    #[test]
    fn test_movement_code_vertical_component() {
        let mut emitter = emitter();
        let mut frame1 = Frame::new();
        frame1.set(ROOT, Vector3::zeros());
        emitter.movement_code(&frame1).unwrap();

        // 真上への移動 → 垂直成分はステップ量そのもの
        let mut frame2 = Frame::new();
        frame2.set(ROOT, Vector3::new(0.0, 2.0, 0.0));
        let code = emitter.movement_code(&frame2).unwrap();
        let expected_first = format!("moveAnchor.move(UP, {}, duration=0);", STEP_LENGTH);
        assert!(
            code.lines().next() == Some(expected_first.as_str()),
            "unexpected first line: {:?}",
            code.lines().next()
        );
    }

    #[test]
    fn test_joints_code_statement_pairs() {
        let mut emitter = emitter();
        let code = emitter.joints_code(&full_frame(2.0)).unwrap();

        let emitted = BONE_TABLE
            .iter()
            .filter(|d| rig::emits_orientation(d.bone))
            .count();
        let set_position = code.matches(".setPosition(").count();
        let point_at = code.matches(".pointAt(").count();
        assert_eq!(set_position, emitted);
        assert_eq!(point_at, emitted);

        // 全文がduration=0で終わる即時コマンド
        for line in code.lines() {
            assert!(line.ends_with("duration=0);"), "line: {}", line);
        }
    }

    #[test]
    fn test_joints_code_excluded_bones_never_appear() {
        let mut emitter = emitter();
        let code = emitter.joints_code(&full_frame(2.0)).unwrap();

        for name in rig::ORIENTATION_EXCLUDED {
            assert!(
                !code.contains(&format!(".{}.", name)),
                "'{}' leaked into the output",
                name
            );
        }
        assert!(code.contains(".leftUpperArm.pointAt("));
    }

    #[test]
    fn test_roll_only_when_flipped() {
        let mut emitter = emitter();
        // 同一深度 → 全方向ベクトルのz成分が0 → ロールなし
        let code = emitter.joints_code(&full_frame(2.0)).unwrap();
        assert_eq!(code.matches(".roll(").count(), 0);

        // 左手首→手を後ろ向き（z+）にする → leftHandのみロール
        let mut frame = full_frame(2.0);
        let wrist = frame.get(JointIndex::WristLeft).unwrap();
        frame.set(JointIndex::HandLeft, wrist + Vector3::new(0.0, 0.0, 0.4));
        let code = emitter.joints_code(&frame).unwrap();
        assert_eq!(code.matches(".roll(").count(), 1);
        assert!(code.contains("character.leftHand.roll(LEFT, 0.5, duration=0);"));
    }

    #[test]
    fn test_custom_names_from_config() {
        let config = ScriptConfig {
            character: "puppet".to_string(),
            anchor: "base".to_string(),
            marker: "target".to_string(),
        };
        let mut emitter = ScriptEmitter::new(&config);

        let mut frame = Frame::new();
        frame.set(ROOT, Vector3::zeros());
        let code = emitter.movement_code(&frame).unwrap();
        assert_eq!(
            code,
            "base.move(UP, 0, duration=0);\npuppet.moveTo(base, duration=0);\n"
        );

        let code = emitter.joints_code(&full_frame(2.0)).unwrap();
        assert!(code.contains("target.setPosition("));
        assert!(code.contains("puppet.leftThigh.pointAt(target, duration=0);"));
    }

    #[test]
    fn test_init_starts_new_session() {
        let mut emitter = emitter();
        let mut frame1 = Frame::new();
        frame1.set(ROOT, Vector3::zeros());
        emitter.movement_code(&frame1).unwrap();

        emitter.init();

        // init後の最初のフレームは移動ゼロに戻る
        let mut frame2 = Frame::new();
        frame2.set(ROOT, Vector3::new(1.0, 1.0, 1.0));
        let code = emitter.movement_code(&frame2).unwrap();
        assert!(code.starts_with("moveAnchor.move(UP, 0, duration=0);"));
    }
}

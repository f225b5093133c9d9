use anyhow::{Context, Result};
use bunraku_scripter::config::Config;
use bunraku_scripter::frame::{Frame, JointIndex};
use bunraku_scripter::rig;
use bunraku_scripter::script::ScriptEmitter;
use nalgebra::Vector3;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};

const CONFIG_PATH: &str = "config.toml";

/// キャプチャダンプ（1行1フレームのJSON: 関節名 → [x, y, z]）を読み、
/// アニメーションスクリプトを標準出力へ書き出す。
fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);
    rig::validate_table().context("ボーンテーブルが不正です")?;

    let path = std::env::args()
        .nth(1)
        .context("使い方: bunraku-scripter <capture.jsonl>")?;
    let file =
        File::open(&path).with_context(|| format!("キャプチャダンプを開けません: {}", path))?;

    let mut emitter = ScriptEmitter::new(&config.script);
    emitter.init();

    let mut generated = 0usize;
    let mut skipped = 0usize;

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let named: HashMap<String, [f32; 3]> = serde_json::from_str(&line)
            .with_context(|| format!("{}行目: JSONが不正です", line_no + 1))?;
        let mut frame = Frame::new();
        for (name, p) in &named {
            let joint = JointIndex::from_name(name)
                .with_context(|| format!("{}行目: 未知の関節名 '{}'", line_no + 1, name))?;
            frame.set(joint, Vector3::new(p[0], p[1], p[2]));
        }

        // 関節欠落はフレーム単位で回復可能: スキップして次へ
        let movement = match emitter.movement_code(&frame) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{}行目をスキップ: {}", line_no + 1, e);
                skipped += 1;
                continue;
            }
        };
        let joints = match emitter.joints_code(&frame) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{}行目をスキップ: {}", line_no + 1, e);
                skipped += 1;
                continue;
            }
        };

        print!("{}", movement);
        print!("{}", joints);
        generated += 1;
    }

    eprintln!("生成完了: {}フレーム (スキップ: {})", generated, skipped);
    Ok(())
}

use nalgebra::Vector3;

/// キャプチャスケルトンの20関節インデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum JointIndex {
    HipCenter = 0,
    Spine = 1,
    ShoulderCenter = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
}

impl JointIndex {
    pub const COUNT: usize = 20;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::HipCenter),
            1 => Some(Self::Spine),
            2 => Some(Self::ShoulderCenter),
            3 => Some(Self::Head),
            4 => Some(Self::ShoulderLeft),
            5 => Some(Self::ElbowLeft),
            6 => Some(Self::WristLeft),
            7 => Some(Self::HandLeft),
            8 => Some(Self::ShoulderRight),
            9 => Some(Self::ElbowRight),
            10 => Some(Self::WristRight),
            11 => Some(Self::HandRight),
            12 => Some(Self::HipLeft),
            13 => Some(Self::KneeLeft),
            14 => Some(Self::AnkleLeft),
            15 => Some(Self::FootLeft),
            16 => Some(Self::HipRight),
            17 => Some(Self::KneeRight),
            18 => Some(Self::AnkleRight),
            19 => Some(Self::FootRight),
            _ => None,
        }
    }

    /// キャプチャダンプで使う関節名
    pub fn name(&self) -> &'static str {
        match self {
            Self::HipCenter => "HipCenter",
            Self::Spine => "Spine",
            Self::ShoulderCenter => "ShoulderCenter",
            Self::Head => "Head",
            Self::ShoulderLeft => "ShoulderLeft",
            Self::ElbowLeft => "ElbowLeft",
            Self::WristLeft => "WristLeft",
            Self::HandLeft => "HandLeft",
            Self::ShoulderRight => "ShoulderRight",
            Self::ElbowRight => "ElbowRight",
            Self::WristRight => "WristRight",
            Self::HandRight => "HandRight",
            Self::HipLeft => "HipLeft",
            Self::KneeLeft => "KneeLeft",
            Self::AnkleLeft => "AnkleLeft",
            Self::FootLeft => "FootLeft",
            Self::HipRight => "HipRight",
            Self::KneeRight => "KneeRight",
            Self::AnkleRight => "AnkleRight",
            Self::FootRight => "FootRight",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        (0..Self::COUNT)
            .filter_map(Self::from_index)
            .find(|j| j.name() == name)
    }
}

/// キャプチャ1フレーム分の関節位置
///
/// 座標系はキャプチャデバイス基準（X右, Y上, Z奥行き: 正=デバイスから遠ざかる方向）。
/// デバイスが検出できなかった関節はNone。コア側からは読み取り専用。
#[derive(Debug, Clone)]
pub struct Frame {
    joints: [Option<Vector3<f32>>; JointIndex::COUNT],
}

impl Frame {
    pub fn new() -> Self {
        Self {
            joints: [None; JointIndex::COUNT],
        }
    }

    pub fn set(&mut self, joint: JointIndex, position: Vector3<f32>) {
        self.joints[joint as usize] = Some(position);
    }

    pub fn get(&self, joint: JointIndex) -> Option<Vector3<f32>> {
        self.joints[joint as usize]
    }

    /// 検出済み関節数
    pub fn tracked_count(&self) -> usize {
        self.joints.iter().filter(|j| j.is_some()).count()
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

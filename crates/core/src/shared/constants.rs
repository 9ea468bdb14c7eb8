pub const YOLO_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

/// 68-point landmark model. Looked up by this fixed name; never downloaded.
pub const LANDMARK_MODEL_NAME: &str = "face_landmarks.onnx";

/// Capture device opened when no input file is given.
pub const DEFAULT_CAMERA_INDEX: i32 = 0;

/// Requested capture resolution. Sources treat it as a hint only.
pub const DEFAULT_CAPTURE_WIDTH: u32 = 10;
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 5;

pub const DEFAULT_QUIT_KEY: char = 'q';

/// Key poll timeout per iteration.
pub const KEY_POLL_MS: i32 = 1;

pub const WINDOW_TITLE: &str = "Face Monitor";

pub const LOOKING_TEXT: &str = "Looking at Monitor";
pub const NOT_LOOKING_TEXT: &str = "Not Looking at Monitor";

/// Baseline origin shared by every label (later faces overdraw earlier ones).
pub const LABEL_POSITION: (i32, i32) = (50, 50);

/// Label colours as RGB.
pub const LOOKING_COLOR: [u8; 3] = [0, 255, 0];
pub const NOT_LOOKING_COLOR: [u8; 3] = [255, 0, 0];

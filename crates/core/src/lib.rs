pub mod detection {
    pub mod domain {
        pub mod face_detector;
        pub mod face_shape;
        pub mod landmark_predictor;
    }
    pub mod infrastructure;
}

pub mod display {
    pub mod domain {
        pub mod display_surface;
        pub mod gaze_label;
    }
    pub mod infrastructure {
        pub mod headless_display;
        pub mod highgui_display;
    }
}

pub mod gaze {
    pub mod domain {
        pub mod eye_landmarks;
        pub mod gaze_estimator;
    }
}

pub mod pipeline {
    pub mod monitor_faces_use_case;
    pub mod pipeline_logger;
}

pub mod shared {
    pub mod constants;
    pub mod frame;
    pub mod model_resolver;
    pub mod point;
    pub mod region;
}

pub mod video {
    pub mod domain {
        pub mod frame_source;
    }
    pub mod infrastructure {
        pub mod ffmpeg_reader;
        pub mod opencv_camera;
    }
}

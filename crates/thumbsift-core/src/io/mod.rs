pub mod frames;
pub mod info_json;
pub mod storyboard;

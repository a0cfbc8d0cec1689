use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::frame_failure::FrameFailure;

#[derive(Debug)]
pub enum RenderEvent {
    Frame(FrameData),
    Error(FrameFailure),
}

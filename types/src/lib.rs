//! Generated gRPC types for the `rect.RectangleFinder` service.

pub mod rect {
    tonic::include_proto!("rect");
}

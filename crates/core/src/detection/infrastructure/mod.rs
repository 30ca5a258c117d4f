pub mod execution_provider;
pub mod model_resolver;
pub mod onnx_face_provider;
pub mod onnx_provider_factory;

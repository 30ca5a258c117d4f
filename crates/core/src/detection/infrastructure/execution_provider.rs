use crate::detection::domain::provider_options::Delegate;

/// Map a delegate preference to ONNX execution providers for this platform.
///
/// An empty list means ONNX Runtime's default CPU path. The GPU preference
/// degrades to that same path on platforms without an accelerated provider.
pub fn execution_providers_for(
    delegate: Delegate,
) -> Vec<ort::execution_providers::ExecutionProviderDispatch> {
    if delegate == Delegate::Cpu {
        return vec![];
    }
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_delegate_uses_no_accelerated_providers() {
        assert!(execution_providers_for(Delegate::Cpu).is_empty());
    }
}

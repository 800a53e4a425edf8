use burn::backend::{Autodiff, NdArray, Wgpu};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// CPU backend, also used by the unit tests
pub type CpuBackend      = NdArray;
pub type CpuTrainBackend = Autodiff<CpuBackend>;

pub type GpuBackend      = Wgpu;
pub type GpuTrainBackend = Autodiff<GpuBackend>;

/// Backend selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Pure-Rust CPU tensors
    #[default]
    Ndarray,
    /// GPU through WebGPU (Vulkan / Metal / DX12)
    Wgpu,
}

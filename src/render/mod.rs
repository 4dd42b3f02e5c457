pub mod binning;
pub mod colors;
pub mod spectrogram;

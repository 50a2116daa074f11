pub mod nefsort_core;

//! Wire-format adapters. The harness speaks JSON lines on both sides: command
//! envelopes in, delivered results out.

pub mod jsonl;

//! Blocking retry examples.
//!
//! Demonstrates value-based polling, conditional retry, budget exhaustion
//! and cyclic recovery with a failure hook.
//!
//! Run with: cargo run --example blocking_retry

use std::cell::RefCell;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::time::Duration;

use retry_until::{Retryable, attempt};

#[derive(Debug)]
enum ApiError {
    Timeout,
    NotFound,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    println!("=== retry-until Blocking Examples ===\n");

    // Example 1: poll a value until it is ready
    println!("1. Value-based termination - success after retries:");
    let mut countdown = 3;
    let result = (|| {
        countdown -= 1;
        println!("   Attempt leaves countdown at {countdown}");
        Ok::<_, ApiError>(countdown)
    })
    .retry()
    .with_try_interval(Duration::from_millis(100))
    .on_failure_with_attempt(|failure, count| {
        println!("   -> attempt {count} unsatisfied: {failure:?}");
    })
    .until(|remaining| *remaining == 0);

    println!("   Result: {result:?}\n");

    // Example 2: conditional retry, only timeouts are retryable
    println!("2. Conditional retry - NotFound is fatal:");
    let mut calls = 0;
    let result: Result<&str, _> = (|| {
        calls += 1;
        println!("   Attempt {calls}");
        if calls == 1 {
            Err(ApiError::Timeout)
        } else {
            Err(ApiError::NotFound)
        }
    })
    .retry()
    .with_try_interval(Duration::from_millis(50))
    .when(|e| matches!(e, ApiError::Timeout))
    .until_ok();

    println!("   Result: {result:?}\n");

    // Example 3: retry budget exhausted
    println!("3. Exhaustion - max try count reached:");
    let mut attempts = 0;
    let result: Result<&str, _> = attempt(|| {
        attempts += 1;
        println!("   Attempt {attempts}");
        Err::<_, ApiError>(ApiError::Timeout)
    })
    .with_try_interval(Duration::from_millis(10))
    .with_max_try_count(3)
    .expect("non-zero try count")
    .until_ok();

    println!("   Result: {result:?}\n");

    // Example 4: a failure hook repairs state between attempts
    println!("4. Cyclic recovery - rewinding an exhausted reader:");
    let reader = RefCell::new(Cursor::new(vec![10u8, 20, 30]));
    for _ in 0..7 {
        let byte = attempt(|| {
            let mut buf = [0u8; 1];
            reader.borrow_mut().read_exact(&mut buf).map(|_| buf[0])
        })
        .with_try_interval(Duration::ZERO)
        .on_failure(|_| {
            reader
                .borrow_mut()
                .seek(SeekFrom::Start(0))
                .expect("in-memory seek");
        })
        .until_ok()
        .expect("hook rewinds the reader before every retry");
        print!("{byte} ");
    }
    println!();

    println!("\n=== All examples completed ===");
}

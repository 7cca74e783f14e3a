use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use lodestone_core::{
    must,
    runtime::{
        abstract_operations::{create_data_property, get, set},
        ordinary_object::ordinary_object_create,
        property_key::PropertyKey,
        Context, Value,
    },
};

fn property_keys(cx: &mut Context, count: usize) -> Vec<PropertyKey> {
    (0..count)
        .map(|i| PropertyKey::string(cx, &format!("property{}", i)))
        .collect()
}

/// Build a single object one data property at a time, walking down the
/// shape transition tree on every addition.
fn bench_build_object(c: &mut Criterion) {
    c.bench_function("object > add 32 properties", |b| {
        b.iter_batched(
            || {
                let mut cx = Context::new();
                let keys = property_keys(&mut cx, 32);
                (cx, keys)
            },
            |(mut cx, keys)| {
                let object = ordinary_object_create(&mut cx, None);
                for (i, key) in keys.iter().enumerate() {
                    must!(create_data_property(
                        &mut cx,
                        object.clone(),
                        key,
                        Value::number(i as f64)
                    ));
                }
                (cx, object)
            },
            BatchSize::SmallInput,
        )
    });
}

/// Build many objects with an identical property layout. After the first
/// object every addition hits a cached transition edge.
fn bench_shape_convergence(c: &mut Criterion) {
    c.bench_function("shape > 64 objects converge on one shape", |b| {
        b.iter_batched(
            || {
                let mut cx = Context::new();
                let keys = property_keys(&mut cx, 8);
                (cx, keys)
            },
            |(mut cx, keys)| {
                let mut objects = Vec::with_capacity(64);
                for _ in 0..64 {
                    let object = ordinary_object_create(&mut cx, None);
                    for key in &keys {
                        must!(create_data_property(
                            &mut cx,
                            object.clone(),
                            key,
                            Value::number(0.0)
                        ));
                    }
                    objects.push(object);
                }
                (cx, objects)
            },
            BatchSize::SmallInput,
        )
    });
}

/// Read and overwrite existing data properties, the steady-state fast path.
fn bench_get_set(c: &mut Criterion) {
    c.bench_function("object > get and set 16 properties", |b| {
        b.iter_batched(
            || {
                let mut cx = Context::new();
                let keys = property_keys(&mut cx, 16);
                let object = ordinary_object_create(&mut cx, None);
                for key in &keys {
                    must!(create_data_property(&mut cx, object.clone(), key, Value::number(0.0)));
                }
                (cx, object, keys)
            },
            |(mut cx, object, keys)| {
                for key in &keys {
                    let value = must!(get(&mut cx, object.clone(), key));
                    let new_value = Value::number(value.as_number() + 1.0);
                    must!(set(&mut cx, object.clone(), key, new_value, false));
                }
                (cx, object)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_build_object, bench_shape_convergence, bench_get_set);
criterion_main!(benches);

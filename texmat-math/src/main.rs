use texmat_math::{Axis, Mat4, Vec3};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut model = Mat4::new_identity();
    model.translate(4.0, 5.0, 6.0);
    model.rotate(90.0, Axis::Z);
    model.scale(2.0, 2.0, 2.0);

    println!("Model Matrix result:");
    model.print();

    let view = Mat4::look_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y)?;
    println!("\nView Matrix result:");
    view.print();

    let projection = Mat4::perspective(45.0f32.to_radians(), 4.0 / 3.0, 0.01, 100.0);
    println!("\nProjection Matrix result:");
    projection.print();

    // flat layout, as uploaded to a shader uniform
    let mvp = model * view * projection;
    println!("\nMVP (flat): {:?}", mvp.as_slice());

    Ok(())
}

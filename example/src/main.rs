use std::time::Duration;

use tny_remote::drivers::{TnyDriver, TnyDriverConfig};
use tny_remote::{Tny360Remote, TnyError};
use tokio::time::sleep;

#[tokio::main]
async fn main() -> Result<(), TnyError> {
    tracing_subscriber::fmt::init();

    let driver_settings = TnyDriverConfig {
        addr: "192.168.4.1".to_string(),
        port: 5621,
        timeout_ms: 1_000,
    };

    println!("going to connect");
    let driver = match TnyDriver::connect(driver_settings.clone()).await {
        Ok(driver) => {
            println!("Connected successfully");
            driver
        }
        Err(e) => {
            println!("Failed to connect to {:?} : {}", driver_settings, e);
            return Err(e);
        }
    };

    let robot = Tny360Remote::new(driver.clone());

    robot.ping().await?;
    println!("controller is alive");

    let angles = robot.get_all_joint_angles().await?;
    for (joint, angle) in angles.iter().enumerate() {
        let state = robot.get_calibration_state(joint as u8).await?;
        println!("joint {:2}: {:8.2} deg  ({:?})", joint, angle, state);
    }

    let orientation = robot.get_body_orientation().await?;
    println!("body orientation: {:?}", orientation);

    // Lean the body 5 degrees forward, hold it, then level out.
    robot.set_body_posture(5.0, 0.0, 0.0, 0.0, 0.0, 0.0).await?;
    sleep(Duration::from_secs(2)).await;
    robot.set_body_posture(0.0, 0.0, 0.0, 0.0, 0.0, 0.0).await?;

    driver.disconnect().await;
    Ok(())
}

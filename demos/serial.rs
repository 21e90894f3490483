use std::env;

use gpp4323::{
    serial::{SerialPortManager, port_to_resource},
    session::{Session, SerialConfig},
    types::{Channel, State},
};
use inquire::Select;

// Configuration constants - adjust these for your setup
const CHANNEL: u8 = 1;
const OUTPUT_VOLTAGE_V: f32 = 5.0;
const CURRENT_LIMIT_A: f32 = 0.1;
const OVER_VOLTAGE_V: f32 = 6.0;
const OVER_CURRENT_A: f32 = 0.2;
const STABILIZATION_DELAY_MS: u64 = 1000;

fn main() {
    env_logger::init();

    // Get the resource from command line arg or interactive selection
    let resource = env::args().nth(1).unwrap_or_else(|| {
        let ports = serialport::available_ports().expect("Failed to enumerate serial ports");

        if ports.is_empty() {
            eprintln!("No serial ports found!");
            std::process::exit(1);
        }

        let resources: Vec<String> = ports.iter().map(|p| port_to_resource(&p.port_name)).collect();

        Select::new("Select the GPP-4323:", resources)
            .prompt()
            .expect("Failed to select port")
    });

    let config = SerialConfig {
        resource_filter: resource,
        ..SerialConfig::default()
    };
    let mut session: Session<SerialPortManager> =
        Session::with_config(SerialPortManager::new(), config);

    if !session.connect().expect("Failed to open serial port") {
        eprintln!("GPP-4323 not found");
        std::process::exit(1);
    }

    let channel = Channel::try_from(CHANNEL).expect("Invalid channel");
    let psu = session.instrument().expect("Not connected");

    println!("Identity: {}", psu.get_device_identity().unwrap());

    psu.set_voltage_protection(channel, OVER_VOLTAGE_V).unwrap();
    psu.set_current_protection(channel, OVER_CURRENT_A).unwrap();
    println!("Set OVP to {}V, OCP to {}A", OVER_VOLTAGE_V, OVER_CURRENT_A);

    psu.set_voltage(channel, OUTPUT_VOLTAGE_V).unwrap();
    psu.set_current(channel, CURRENT_LIMIT_A).unwrap();
    println!(
        "Setpoints: {}V / {}A",
        psu.get_voltage(channel).unwrap(),
        psu.get_current(channel).unwrap()
    );

    psu.set_state(channel, State::On).unwrap();
    println!("Output: {:?}", psu.get_output_state(channel).unwrap());

    // Wait for output to stabilize
    std::thread::sleep(std::time::Duration::from_millis(STABILIZATION_DELAY_MS));

    println!(
        "Measured: {:.3}V {:.4}A {:.3}W",
        psu.read_measured_voltage(channel).unwrap(),
        psu.read_measured_current(channel).unwrap(),
        psu.read_measured_power(channel).unwrap()
    );

    psu.set_state(channel, "off").unwrap();
    println!("Output: {}", psu.get_state(channel).unwrap());

    session.disconnect().unwrap();
}

//! Register definitions for the BME680 and the LSM9DS1 accelerometer/gyroscope
//!
//! Bit-field layouts follow the manufacturers' datasheets. Register names are
//! descriptive; the datasheet name is given in each doc comment.
//!
//! Calibration memory and the sample data blocks are read as raw bursts by
//! the drivers and are not modelled here.

/// BME680 control and status registers
///
/// Addresses are full 8-bit addresses. Registers at 0x80 and above live on SPI
/// page 0, the rest on page 1; [`crate::PagedInterface`] handles the switch.
pub mod bme680 {
    device_driver::create_device!(
        device_name: Bme680,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = LE;
            }

            /// meas_status_0 - Measurement status (0x1D)
            register MeasStatus {
                const ADDRESS = 0x1D;
                const SIZE_BITS = 8;

                /// Index of the gas heater profile last measured
                gas_meas_index: uint = 0..4,
                /// Conversion in progress
                measuring: bool = 5,
                /// Gas conversion in progress
                gas_measuring: bool = 6,
                /// New data available in the data registers
                new_data: bool = 7,
            },

            /// ctrl_gas_1 - Gas control (0x71)
            register CtrlGas {
                const ADDRESS = 0x71;
                const SIZE_BITS = 8;

                /// Heater profile selected for the next conversion
                nb_conv: uint = 0..4,
                /// Enable gas conversion
                run_gas: bool = 4,
            },

            /// ctrl_hum - Humidity control (0x72)
            register CtrlHum {
                const ADDRESS = 0x72;
                const SIZE_BITS = 8;

                /// Humidity oversampling
                osrs_h: uint = 0..3,
                /// Data-ready interrupt on SDO in SPI 3-wire mode
                spi_three_wire_int: bool = 6,
            },

            /// ctrl_meas - Measurement control (0x74)
            register CtrlMeas {
                const ADDRESS = 0x74;
                const SIZE_BITS = 8;

                /// Power mode (0 = sleep, 1 = forced)
                mode: uint = 0..2,
                /// Pressure oversampling
                osrs_p: uint = 2..5,
                /// Temperature oversampling
                osrs_t: uint = 5..8,
            },

            /// config - IIR filter and interface configuration (0x75)
            register FilterConfig {
                const ADDRESS = 0x75;
                const SIZE_BITS = 8;

                /// Enable SPI 3-wire mode
                spi_three_wire: bool = 0,
                /// IIR filter coefficient (0 = filter off)
                filter: uint = 2..5,
            },

            /// id - Chip identification (0xD0)
            register ChipId {
                const ADDRESS = 0xD0;
                const SIZE_BITS = 8;

                /// Chip ID (should read 0x61)
                chip_id: uint = 0..8,
            },

            /// reset - Soft reset (0xE0)
            register SoftReset {
                const ADDRESS = 0xE0;
                const SIZE_BITS = 8;

                /// Writing 0xB6 resets the device
                reset: uint = 0..8,
            }
        }
    );

    /// Value written to [`SoftReset`] to reset the device
    pub const SOFT_RESET_COMMAND: u8 = 0xB6;

    /// First register of the pressure/temperature/humidity data block
    pub const DATA_START: u8 = 0x1F;

    /// Length of the pressure/temperature/humidity data block
    pub const DATA_LEN: usize = 8;

    /// First register of the temperature/pressure calibration block
    pub const CALIB_TP_START: u8 = 0x8A;

    /// Length of the temperature/pressure calibration block (0x8A-0xA0)
    pub const CALIB_TP_LEN: usize = 23;

    /// First register of the humidity/temperature calibration block
    pub const CALIB_HT_START: u8 = 0xE1;

    /// Length of the humidity/temperature calibration block (0xE1-0xEA)
    pub const CALIB_HT_LEN: usize = 10;

    /// Power mode value of [`CtrlMeas`] for sleep
    pub const MODE_SLEEP: u8 = 0;

    /// Power mode value of [`CtrlMeas`] for a single forced measurement
    pub const MODE_FORCED: u8 = 1;
}

/// LSM9DS1 accelerometer/gyroscope registers
pub mod lsm9ds1 {
    device_driver::create_device!(
        device_name: Lsm9ds1Ag,
        dsl: {
            config {
                type RegisterAddressType = u8;
                type DefaultByteOrder = LE;
            }

            /// WHO_AM_I - Device identification (0x0F)
            register WhoAmI {
                const ADDRESS = 0x0F;
                const SIZE_BITS = 8;

                /// Device ID (should read 0x68)
                who_am_i: uint = 0..8,
            },

            /// CTRL_REG1_G - Gyroscope data rate and full scale (0x10)
            register GyroControl {
                const ADDRESS = 0x10;
                const SIZE_BITS = 8;

                /// Bandwidth selection
                bw_g: uint = 0..2,
                /// Full-scale selection
                fs_g: uint = 3..5,
                /// Output data rate selection
                odr_g: uint = 5..8,
            },

            /// CTRL_REG2_G - Gyroscope output path (0x11)
            register GyroOutput {
                const ADDRESS = 0x11;
                const SIZE_BITS = 8;

                /// Output filter selection
                out_sel: uint = 0..2,
                /// Interrupt generator filter selection
                int_sel: uint = 2..4,
            },

            /// CTRL_REG3_G - Gyroscope power and high-pass filter (0x12)
            register GyroHighPass {
                const ADDRESS = 0x12;
                const SIZE_BITS = 8;

                /// High-pass cutoff frequency selection
                hpcf_g: uint = 0..4,
                /// High-pass filter enable
                hp_en: bool = 6,
                /// Low-power mode enable
                lp_mode: bool = 7,
            },

            /// STATUS_REG - Gyroscope status (0x17)
            register GyroStatus {
                const ADDRESS = 0x17;
                const SIZE_BITS = 8;

                /// New accelerometer data available
                xlda: bool = 0,
                /// New gyroscope data available
                gda: bool = 1,
                /// New temperature data available
                tda: bool = 2,
                /// Boot running
                boot_status: bool = 3,
                /// Inactivity interrupt
                inact: bool = 4,
                /// Gyroscope interrupt
                ig_g: bool = 5,
                /// Accelerometer interrupt
                ig_xl: bool = 6,
            },

            /// CTRL_REG4 - Gyroscope axis enable (0x1E)
            register GyroAxes {
                const ADDRESS = 0x1E;
                const SIZE_BITS = 8;

                /// Gyroscope X-axis output enable
                xen_g: bool = 3,
                /// Gyroscope Y-axis output enable
                yen_g: bool = 4,
                /// Gyroscope Z-axis output enable
                zen_g: bool = 5,
            },

            /// CTRL_REG5_XL - Accelerometer axis enable and decimation (0x1F)
            register AccelAxes {
                const ADDRESS = 0x1F;
                const SIZE_BITS = 8;

                /// Accelerometer X-axis output enable
                xen_xl: bool = 3,
                /// Accelerometer Y-axis output enable
                yen_xl: bool = 4,
                /// Accelerometer Z-axis output enable
                zen_xl: bool = 5,
                /// Decimation of acceleration data
                dec: uint = 6..8,
            },

            /// CTRL_REG6_XL - Accelerometer data rate and full scale (0x20)
            register AccelControl {
                const ADDRESS = 0x20;
                const SIZE_BITS = 8;

                /// Anti-aliasing filter bandwidth
                bw_xl: uint = 0..2,
                /// Bandwidth taken from `bw_xl` instead of the data rate
                bw_scal_odr: bool = 2,
                /// Full-scale selection
                fs_xl: uint = 3..5,
                /// Output data rate selection
                odr_xl: uint = 5..8,
            },

            /// CTRL_REG8 - Interface control (0x22)
            register InterfaceControl {
                const ADDRESS = 0x22;
                const SIZE_BITS = 8;

                /// Software reset
                sw_reset: bool = 0,
                /// Big-endian data selection
                ble: bool = 1,
                /// Register address auto-increment on multi-byte access
                if_add_inc: bool = 2,
                /// SPI 3-wire mode
                sim: bool = 3,
                /// Open-drain interrupt pins
                pp_od: bool = 4,
                /// Interrupts active low
                h_lactive: bool = 5,
                /// Block data update
                bdu: bool = 6,
                /// Reboot memory content
                boot: bool = 7,
            }
        }
    );

    /// First register of the temperature, status and gyroscope block (OUT_TEMP_L)
    pub const TEMP_GYRO_START: u8 = 0x15;

    /// Length of the block starting at [`TEMP_GYRO_START`] (0x15-0x1D)
    pub const TEMP_GYRO_LEN: usize = 9;

    /// Status register (STATUS_REG), also byte 2 of the temperature block
    pub const STATUS_REG: u8 = 0x17;

    /// Gyroscope X-axis low byte (OUT_X_L_G)
    pub const GYRO_START: u8 = 0x18;

    /// First accelerometer output register (OUT_X_L_XL)
    pub const ACCEL_START: u8 = 0x28;

    /// Length of a three-axis output block
    pub const AXES_LEN: usize = 6;
}

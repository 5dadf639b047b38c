extern crate clap;
extern crate colored;
extern crate gold_decoder;
extern crate serde_json;

use std::sync::Arc;
use std::time::Instant;

use clap::{Arg, App, ArgMatches};
use colored::*;

use gold_decoder::{io, DecoderErr};
use gold_decoder::gnss::acquisition::{self, AcquisitionResult, Thresholds};
use gold_decoder::gnss::acquisition::fft_correlator::FftCorrelator;
use gold_decoder::gnss::acquisition::sliding_correlator::SlidingCorrelator;
use gold_decoder::gnss::constants::DEFAULT_DETECTION_MARGIN;
use gold_decoder::gnss::gps_l1_ca::signal_modulation::{self, CodeTable};

fn dump_codes(codes:&CodeTable) {
	for (sv_idx, code) in codes.iter().enumerate() {
		eprintln!("{}", format!("Satellite {:2} chips:   {}", sv_idx + 1, code.chip_string()).blue());
		eprintln!("{}", format!("Satellite {:2} bipolar: {}", sv_idx + 1, code.bipolar_string()).blue());
	}
}

async fn run(matches:&ArgMatches<'_>) -> Result<(), DecoderErr> {

	let fname:&str = matches.value_of("filename").ok_or_else(|| DecoderErr::Other("Missing file path argument".to_string()))?;
	let margin:u32 = match matches.value_of("margin") {
		Some(s) => s.parse().map_err(|_| DecoderErr::Other(format!("Invalid detection margin '{}'", s)))?,
		None    => DEFAULT_DETECTION_MARGIN,
	};
	let thresholds = Thresholds::from_margin(margin)?;
	let method:&str = matches.value_of("method").unwrap_or("sliding");
	let verbose = matches.is_present("verbose");

	eprintln!("Decoding {} with the {} correlator, thresholds {}/{}", &fname, method, thresholds.upper, thresholds.lower);

	let samples = io::read_sample_file(fname)?;
	if verbose {
		eprintln!("{}", format!("Samples: {:?}", samples.values()).blue());
	}

	let start = Instant::now();

	let codes = signal_modulation::generate_gps_ca_codes();
	if verbose { dump_codes(&codes); }

	let results:Vec<AcquisitionResult> = match (method, matches.is_present("concurrent")) {
		("fft", false) => acquisition::acquire_all(&FftCorrelator::new(thresholds), &codes, &samples)?,
		("fft", true)  => acquisition::acquire_all_concurrent(Arc::new(FftCorrelator::new(thresholds)), Arc::new(codes), Arc::new(samples)).await?,
		(_, false)     => acquisition::acquire_all(&SlidingCorrelator::new(thresholds), &codes, &samples)?,
		(_, true)      => acquisition::acquire_all_concurrent(Arc::new(SlidingCorrelator::new(thresholds)), Arc::new(codes), Arc::new(samples)).await?,
	};

	let elapsed_sec:f64 = start.elapsed().as_secs_f64();

	let n_detected = results.iter().filter(|r| r.is_detected()).count();
	let summary = format!("{} of {} satellites acquired", n_detected, results.len());
	if n_detected > 0 { eprintln!("{}", summary.green()); }
	else              { eprintln!("{}", summary.yellow()); }

	if matches.is_present("json") {
		let json = serde_json::to_string_pretty(&results).map_err(|e| DecoderErr::Other(e.to_string()))?;
		println!("{}", json);
	} else {
		for result in &results {
			println!("{}", result);
		}
	}

	if !matches.is_present("no_timing") {
		if matches.is_present("json") { eprintln!("Time: {:.6} [sec]", elapsed_sec); }
		else                          { println!("Time: {:.6} [sec]", elapsed_sec);  }
	}

	Ok(())
}

#[tokio::main]
pub async fn main() {

	let default_margin:String = DEFAULT_DETECTION_MARGIN.to_string();

	let matches = App::new("GPS Gold Code Decoder")
		.version("0.1.0")
		.author("John Stanford (johnwstanford@gmail.com)")
		.about("Generates the C/A Gold codes for 24 satellites and recovers one bit per satellite from a 1023-sample sequence")
		.arg(Arg::with_name("filename")
			.help("Text file holding 1023 single-digit samples")
			.index(1))
		.arg(Arg::with_name("margin")
			.short("m").long("margin")
			.help("Distance of the detection thresholds from a perfect correlation of +/-1023")
			.takes_value(true).default_value(&default_margin))
		.arg(Arg::with_name("method")
			.long("method")
			.takes_value(true)
			.possible_values(&["sliding", "fft"])
			.default_value("sliding"))
		.arg(Arg::with_name("concurrent")
			.long("concurrent")
			.help("Search all satellites in parallel"))
		.arg(Arg::with_name("json")
			.long("json")
			.help("Print results as JSON"))
		.arg(Arg::with_name("verbose")
			.short("v").long("verbose")
			.help("Dump samples and generated codes to stderr"))
		.arg(Arg::with_name("no_timing")
			.long("no-timing")
			.help("Don't print the elapsed time"))
		.get_matches();

	if let Err(e) = run(&matches).await {
		println!("Error: {}", e);
		eprintln!("{}", format!("Error: {}", e).red());
		std::process::exit(1);
	}

}
